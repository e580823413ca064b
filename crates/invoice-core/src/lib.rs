//! Invoice Core - Taiwan uniform invoice (統一發票) computations
//!
//! This crate provides:
//! - Amount resolution (subtotal, 5% business tax, total) from user input
//! - ROC (民國) calendar dates and bi-monthly invoice periods
//! - Boxed Chinese numeral cells for the 國字金額 row
//! - Input validation and the combined [`Invoice`] record handed to renderers
//!
//! # Example
//!
//! ```
//! use invoice_core::{AmountResolver, AmountType, CalendarFormatter, NumeralFormatter, TaxType};
//! use chrono::NaiveDate;
//!
//! let amounts = AmountResolver::resolve("1050", AmountType::Total, TaxType::Regular)?;
//! assert_eq!((amounts.subtotal, amounts.tax, amounts.amount), (1000, 50, 1050));
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! assert_eq!(CalendarFormatter::to_roc(&date)?.to_string(), "113年3月15日");
//! assert_eq!(CalendarFormatter::period_of(&date)?.to_string(), "113年3-4月");
//!
//! let cells = NumeralFormatter::format(amounts.amount)?;
//! assert_eq!(cells.len(), 9);
//! # Ok::<(), invoice_core::InvoiceError>(())
//! ```

mod amount;
mod calendar;
mod display;
mod input;
mod invoice;
mod numeral;

pub use amount::{resolve_amount, AmountResolver, AmountResult, AmountType, TaxType};
pub use calendar::{
    invoice_period, parse_iso_date, roc_date, CalendarFormatter, InvoicePeriod, RocDate,
    ROC_EPOCH_OFFSET,
};
pub use display::{
    display_or_blank, format_thousands, BLANK_PLACEHOLDER, INVOICE_TITLE, UNFILLED_LABEL,
};
pub use input::InvoiceInput;
pub use invoice::Invoice;
pub use numeral::{format_numerals, NumeralCell, NumeralFormatter, MAX_BOXED_AMOUNT, NUMERAL_BOXES};

use thiserror::Error;

/// Errors that can occur while computing invoice fields
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvoiceError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid {field}: {value}")]
    InvalidEnum { field: &'static str, value: String },
}

/// Result type for invoice computations
pub type Result<T> = std::result::Result<T, InvoiceError>;
