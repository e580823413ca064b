//! The computed invoice handed to renderers

use chrono::NaiveDate;
use serde::Serialize;

use crate::amount::{resolve_amount, AmountResult, TaxType};
use crate::calendar::{CalendarFormatter, InvoicePeriod, RocDate};
use crate::display::UNFILLED_LABEL;
use crate::input::InvoiceInput;
use crate::numeral::{format_numerals, NumeralCell};
use crate::Result;

/// Every value a renderer needs, computed once from [`InvoiceInput`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub buyer: String,
    pub uniform_number: String,
    /// Gregorian date as entered
    pub date: NaiveDate,
    pub roc_date: RocDate,
    pub period: InvoicePeriod,
    /// Kept as-is so the renderer can tell exempt from zero-rated sales
    pub tax_type: TaxType,
    pub amounts: AmountResult,
    pub numerals: Vec<NumeralCell>,
}

impl Invoice {
    /// Run amount, calendar and numeral computations for one request
    ///
    /// Fails without partial output if any of them rejects its input.
    pub fn build(input: &InvoiceInput) -> Result<Self> {
        let amounts = resolve_amount(input.raw_amount(), input.amount_type, input.tax_type)?;
        let roc_date = CalendarFormatter::to_roc(&input.date)?;
        let period = CalendarFormatter::period_of(&input.date)?;
        let numerals = format_numerals(amounts.amount)?;

        tracing::debug!(
            amount_type = %input.amount_type,
            tax_type = %input.tax_type,
            subtotal = amounts.subtotal,
            tax = amounts.tax,
            amount = amounts.amount,
            period = %period,
            "built invoice"
        );

        Ok(Self {
            buyer: input.buyer.clone(),
            uniform_number: input.uniform_number.clone(),
            date: input.date,
            roc_date,
            period,
            tax_type: input.tax_type,
            amounts,
            numerals,
        })
    }

    /// File name offered when the preview image is downloaded
    pub fn download_file_name(&self) -> String {
        let id = if self.uniform_number.trim().is_empty() {
            UNFILLED_LABEL
        } else {
            self.uniform_number.as_str()
        };
        format!("發票_{}_{}.png", id, self.date.format("%Y-%m-%d"))
    }
}
