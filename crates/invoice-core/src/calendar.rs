//! ROC (民國) calendar dates and bi-monthly invoice periods

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{InvoiceError, Result};

/// Difference between the Gregorian year and the ROC year
pub const ROC_EPOCH_OFFSET: i32 = 1911;

/// First Gregorian year of the ROC calendar (民國元年)
const ROC_FIRST_YEAR: i32 = ROC_EPOCH_OFFSET + 1;

/// A date in the ROC calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RocDate {
    pub roc_year: i32,
    pub month: u32,
    pub day: u32,
}

impl fmt::Display for RocDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}月{}日", self.roc_year, self.month, self.day)
    }
}

/// Two-month filing period printed on the invoice, e.g. `113年3-4月`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePeriod {
    pub roc_year: i32,
    pub start_month: u32,
    pub end_month: u32,
}

impl InvoicePeriod {
    /// Period number within the year, 1 (Jan-Feb) through 6 (Nov-Dec)
    pub fn index(&self) -> u32 {
        self.end_month / 2
    }

    /// First and last month of the period
    pub fn months(&self) -> (u32, u32) {
        (self.start_month, self.end_month)
    }
}

impl fmt::Display for InvoicePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}年{}-{}月",
            self.roc_year, self.start_month, self.end_month
        )
    }
}

/// ROC calendar utilities
pub struct CalendarFormatter;

impl CalendarFormatter {
    /// Convert a Gregorian date to the ROC calendar
    pub fn to_roc<D: Datelike>(date: &D) -> Result<RocDate> {
        roc_date(date.year(), date.month(), date.day())
    }

    /// Invoice period containing a Gregorian date
    pub fn period_of<D: Datelike>(date: &D) -> Result<InvoicePeriod> {
        invoice_period(date.year(), date.month(), date.day())
    }
}

/// Convert Gregorian year/month/day to an ROC date
///
/// Month and day pass through unchanged; only their conventional ranges are
/// checked, days-in-month is the date constructor's concern.
///
/// # Examples
/// ```
/// use invoice_core::roc_date;
/// assert_eq!(roc_date(2024, 3, 15).unwrap().to_string(), "113年3月15日");
/// assert!(roc_date(1911, 12, 31).is_err());
/// ```
pub fn roc_date(year: i32, month: u32, day: u32) -> Result<RocDate> {
    check_fields(year, month, day)?;
    Ok(RocDate {
        roc_year: year - ROC_EPOCH_OFFSET,
        month,
        day,
    })
}

/// Bi-monthly invoice period containing Gregorian year/month/day
///
/// # Examples
/// ```
/// use invoice_core::invoice_period;
/// assert_eq!(invoice_period(2024, 4, 20).unwrap().to_string(), "113年3-4月");
/// ```
pub fn invoice_period(year: i32, month: u32, day: u32) -> Result<InvoicePeriod> {
    let date = roc_date(year, month, day)?;
    let index = month.div_ceil(2);
    Ok(InvoicePeriod {
        roc_year: date.roc_year,
        start_month: index * 2 - 1,
        end_month: index * 2,
    })
}

/// Parse a `YYYY-MM-DD` date as submitted by an HTML date input
pub fn parse_iso_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|_| {
        InvoiceError::InvalidDate(format!("{text}. Expected YYYY-MM-DD"))
    })
}

fn check_fields(year: i32, month: u32, day: u32) -> Result<()> {
    if year < ROC_FIRST_YEAR {
        return Err(InvoiceError::InvalidDate(format!(
            "{year}-{month:02}-{day:02} predates the ROC calendar"
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(InvoiceError::InvalidDate(format!("month {month}")));
    }
    if !(1..=31).contains(&day) {
        return Err(InvoiceError::InvalidDate(format!("day {day}")));
    }
    Ok(())
}
