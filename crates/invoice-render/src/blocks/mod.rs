//! Block content helpers
//!
//! The renderer draws blocks; this module resolves what a block shows.

pub use crate::schema::{Block, FieldFormBlock, LineBlock, TextBlock};

use crate::parser::{resolve_binding, value_to_string};
use crate::schema::FormatType;
use invoice_core::{display_or_blank, format_thousands, NumeralCell};

/// Trait for blocks that can provide their text content
pub trait TextContent {
    /// Get the text content (either static or bound)
    fn get_text(&self, data: &serde_json::Value) -> Option<String>;
}

impl TextContent for TextBlock {
    fn get_text(&self, data: &serde_json::Value) -> Option<String> {
        let raw = match &self.bind {
            Some(bind) => resolve_binding(bind, data).map(value_to_string),
            None => self.text.clone(),
        };

        match self.format_type {
            Some(FormatType::OrBlank) => {
                Some(display_or_blank(raw.as_deref().unwrap_or("")).to_string())
            }
            Some(FormatType::Thousands) => raw.map(|text| match text.parse::<u64>() {
                Ok(n) => format_thousands(n),
                Err(_) => text,
            }),
            None => raw,
        }
    }
}

impl TextContent for FieldFormBlock {
    fn get_text(&self, data: &serde_json::Value) -> Option<String> {
        match &self.bind {
            Some(bind) => resolve_binding(bind, data).map(value_to_string),
            None => self.text.clone(),
        }
    }
}

/// What a field form draws in its boxes
#[derive(Debug, Clone, PartialEq)]
pub enum FieldContent {
    /// Numeral cells of the amount row
    Numerals(Vec<NumeralCell>),
    /// One character per box
    Chars(Vec<char>),
}

impl FieldFormBlock {
    /// Resolve the boxes' content; arrays are read as numeral cells
    pub fn content(&self, data: &serde_json::Value) -> Option<FieldContent> {
        if let Some(value) = self.bind.as_deref().and_then(|b| resolve_binding(b, data)) {
            if value.is_array() {
                return serde_json::from_value(value.clone())
                    .ok()
                    .map(FieldContent::Numerals);
            }
        }

        self.get_text(data)
            .filter(|text| !text.is_empty())
            .map(|text| FieldContent::Chars(text.chars().collect()))
    }
}
