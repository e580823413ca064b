//! Boxed Chinese numerals for the 國字金額 row

use serde::{Deserialize, Serialize};

use crate::{InvoiceError, Result};

/// Number of printed boxes, 億 down to 元
pub const NUMERAL_BOXES: usize = 9;

/// Largest amount the boxes can hold
pub const MAX_BOXED_AMOUNT: u64 = 999_999_999;

/// Formal digits 1-9; zero has no glyph on the form
const DIGITS: [char; 9] = ['壹', '貳', '參', '肆', '伍', '陸', '柒', '捌', '玖'];

/// Box units, most significant first, in the formal 大寫 glyphs printed on the form
const UNITS: [char; NUMERAL_BOXES] = ['億', '仟', '佰', '拾', '萬', '仟', '佰', '拾', '元'];

/// One printed box of the amount row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumeralCell {
    /// Digit glyph, absent for zero
    pub digit: Option<char>,
    /// Positional unit printed under the box
    pub unit: char,
    /// False for the blank run before the first non-zero digit
    pub show: bool,
}

/// Leading-zero suppression state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emission {
    BeforeFirstDigit,
    Emitting,
}

/// Chinese numeral utilities
pub struct NumeralFormatter;

impl NumeralFormatter {
    /// Format an amount into its row of boxes
    pub fn format(amount: u64) -> Result<Vec<NumeralCell>> {
        format_numerals(amount)
    }

    /// Format a dynamically typed amount, rejecting negative or fractional values
    pub fn format_value(amount: f64) -> Result<Vec<NumeralCell>> {
        if !amount.is_finite() || amount < 0.0 || amount.fract() != 0.0 {
            return Err(InvoiceError::InvalidAmount(amount.to_string()));
        }
        if amount > MAX_BOXED_AMOUNT as f64 {
            return Err(InvoiceError::InvalidAmount(amount.to_string()));
        }
        format_numerals(amount as u64)
    }

    /// Shown boxes as one line of text; blank boxes contribute only their unit
    pub fn to_text(amount: u64) -> Result<String> {
        let cells = format_numerals(amount)?;
        Ok(cells
            .iter()
            .filter(|cell| cell.show)
            .flat_map(|cell| cell.digit.into_iter().chain(std::iter::once(cell.unit)))
            .collect())
    }
}

/// Format an amount into [`NUMERAL_BOXES`] cells, most significant first
///
/// # Examples
/// ```
/// use invoice_core::format_numerals;
/// let cells = format_numerals(105).unwrap();
/// let shown: Vec<_> = cells.iter().filter(|c| c.show).map(|c| (c.digit, c.unit)).collect();
/// assert_eq!(shown, vec![(Some('壹'), '佰'), (None, '拾'), (Some('伍'), '元')]);
/// ```
pub fn format_numerals(amount: u64) -> Result<Vec<NumeralCell>> {
    if amount > MAX_BOXED_AMOUNT {
        return Err(InvoiceError::InvalidAmount(amount.to_string()));
    }

    let mut state = Emission::BeforeFirstDigit;
    let mut cells = Vec::with_capacity(NUMERAL_BOXES);

    for (position, unit) in UNITS.iter().enumerate() {
        let power = (NUMERAL_BOXES - 1 - position) as u32;
        let digit = (amount / 10u64.pow(power) % 10) as usize;

        if digit != 0 {
            state = Emission::Emitting;
        }

        let is_units = power == 0;
        cells.push(NumeralCell {
            digit: digit.checked_sub(1).map(|i| DIGITS[i]),
            unit: *unit,
            show: state == Emission::Emitting || is_units,
        });
    }

    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shown(amount: u64) -> Vec<(Option<char>, char)> {
        format_numerals(amount)
            .unwrap()
            .into_iter()
            .filter(|c| c.show)
            .map(|c| (c.digit, c.unit))
            .collect()
    }

    #[test]
    fn test_fixed_length() {
        for amount in [0, 1, 105, 1050, MAX_BOXED_AMOUNT] {
            assert_eq!(format_numerals(amount).unwrap().len(), NUMERAL_BOXES);
        }
    }

    #[test]
    fn test_zero() {
        let cells = format_numerals(0).unwrap();
        assert_eq!(shown(0), vec![(None, '元')]);
        assert!(cells[..NUMERAL_BOXES - 1].iter().all(|c| !c.show));
    }

    #[test]
    fn test_interior_zero_is_shown() {
        assert_eq!(
            shown(105),
            vec![(Some('壹'), '佰'), (None, '拾'), (Some('伍'), '元')]
        );
    }

    #[test]
    fn test_trailing_zeros() {
        assert_eq!(
            shown(1050),
            vec![(Some('壹'), '仟'), (None, '佰'), (Some('伍'), '拾'), (None, '元')]
        );
    }

    #[test]
    fn test_units_follow_positions() {
        let cells = format_numerals(MAX_BOXED_AMOUNT).unwrap();
        let units: String = cells.iter().map(|c| c.unit).collect();
        assert_eq!(units, "億仟佰拾萬仟佰拾元");
        assert!(cells.iter().all(|c| c.show && c.digit == Some('玖')));
    }

    #[test]
    fn test_group_boundaries() {
        assert_eq!(shown(10_000), {
            let mut expected = vec![(Some('壹'), '萬')];
            expected.extend([(None, '仟'), (None, '佰'), (None, '拾'), (None, '元')]);
            expected
        });
        assert_eq!(shown(100_000_000)[0], (Some('壹'), '億'));
    }

    #[test]
    fn test_all_digits() {
        assert_eq!(
            NumeralFormatter::to_text(123_456_789).unwrap(),
            "壹億貳仟參佰肆拾伍萬陸仟柒佰捌拾玖元"
        );
        assert_eq!(NumeralFormatter::to_text(0).unwrap(), "元");
        assert_eq!(NumeralFormatter::to_text(1050).unwrap(), "壹仟佰伍拾元");
    }

    #[test]
    fn test_over_capacity() {
        assert_eq!(
            format_numerals(MAX_BOXED_AMOUNT + 1),
            Err(InvoiceError::InvalidAmount("1000000000".to_string()))
        );
    }

    #[test]
    fn test_format_value_guards() {
        assert_eq!(
            NumeralFormatter::format_value(105.0).unwrap(),
            format_numerals(105).unwrap()
        );
        for bad in [-1.0, 10.5, f64::NAN, f64::INFINITY, 1e10] {
            assert!(
                matches!(
                    NumeralFormatter::format_value(bad),
                    Err(InvoiceError::InvalidAmount(_))
                ),
                "value {bad}"
            );
        }
    }

    #[test]
    fn test_serde_shape() {
        let cell = format_numerals(5).unwrap()[NUMERAL_BOXES - 1];
        assert_eq!(
            serde_json::to_value(cell).unwrap(),
            serde_json::json!({ "digit": "伍", "unit": "元", "show": true })
        );
    }
}
