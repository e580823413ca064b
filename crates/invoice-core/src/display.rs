//! Display helpers shared by renderers

/// Heading of the three-part uniform invoice
pub const INVOICE_TITLE: &str = "統一發票（三聯式）";

/// Full-width space printed where a field was left empty
pub const BLANK_PLACEHOLDER: &str = "　";

/// Stand-in for a missing tax ID in file names
pub const UNFILLED_LABEL: &str = "未填寫";

/// Format an amount with thousand separators
///
/// # Examples
/// ```
/// use invoice_core::format_thousands;
/// assert_eq!(format_thousands(1050), "1,050");
/// assert_eq!(format_thousands(999), "999");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// The text itself, or the full-width blank when it is empty
pub fn display_or_blank(text: &str) -> &str {
    if text.trim().is_empty() {
        BLANK_PLACEHOLDER
    } else {
        text
    }
}
