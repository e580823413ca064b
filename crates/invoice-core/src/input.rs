//! User-supplied invoice fields

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::amount::{AmountType, TaxType};
use crate::calendar::parse_iso_date;
use crate::{InvoiceError, Result};

/// Raw invoice fields as entered by the user
///
/// Only the amount selected by `amount_type` is authoritative, the other one
/// is carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceInput {
    #[serde(default)]
    pub buyer: String,

    #[serde(default)]
    pub uniform_number: String,

    pub date: NaiveDate,

    #[serde(default)]
    pub total_amount: String,

    #[serde(default)]
    pub subtotal_amount: String,

    #[serde(default)]
    pub amount_type: AmountType,

    #[serde(default)]
    pub tax_type: TaxType,
}

impl InvoiceInput {
    /// Build input from request parameters
    ///
    /// Recognized keys: `buyer`, `uniformNumber`, `date`, `totalAmount`,
    /// `subtotalAmount`, `amountType`, `taxType`. The first occurrence of a key
    /// wins and unknown keys are ignored. An absent or empty `amountType` /
    /// `taxType` falls back to `total` / `regular`; any other unrecognized
    /// value is rejected.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut fields: [Option<String>; 7] = Default::default();

        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "buyer" => 0,
                "uniformNumber" => 1,
                "date" => 2,
                "totalAmount" => 3,
                "subtotalAmount" => 4,
                "amountType" => 5,
                "taxType" => 6,
                _ => continue,
            };
            if fields[slot].is_none() {
                fields[slot] = Some(value.as_ref().to_string());
            }
        }

        let [buyer, uniform_number, date, total_amount, subtotal_amount, amount_type, tax_type] =
            fields;

        let date = date
            .filter(|d| !d.is_empty())
            .ok_or_else(|| InvoiceError::InvalidDate("missing date".to_string()))?;

        Ok(Self {
            buyer: buyer.unwrap_or_default(),
            uniform_number: uniform_number.unwrap_or_default(),
            date: parse_iso_date(&date)?,
            total_amount: total_amount.unwrap_or_default(),
            subtotal_amount: subtotal_amount.unwrap_or_default(),
            amount_type: parse_or_default(amount_type)?,
            tax_type: parse_or_default(tax_type)?,
        })
    }

    /// Request parameters that reproduce this input, in canonical order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("buyer", self.buyer.clone()),
            ("uniformNumber", self.uniform_number.clone()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("totalAmount", self.total_amount.clone()),
            ("subtotalAmount", self.subtotal_amount.clone()),
            ("amountType", self.amount_type.as_str().to_string()),
            ("taxType", self.tax_type.as_str().to_string()),
        ]
    }

    /// The amount field selected by `amount_type`
    pub fn raw_amount(&self) -> &str {
        match self.amount_type {
            AmountType::Total => &self.total_amount,
            AmountType::Subtotal => &self.subtotal_amount,
        }
    }
}

fn parse_or_default<T>(value: Option<String>) -> Result<T>
where
    T: std::str::FromStr<Err = InvoiceError> + Default,
{
    match value.as_deref() {
        None | Some("") => Ok(T::default()),
        Some(text) => text.parse(),
    }
}
