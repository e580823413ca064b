//! Amount resolution: subtotal, business tax and total from a single user figure

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::{InvoiceError, Result};

/// Which figure the user typed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmountType {
    /// Tax-inclusive total
    #[default]
    Total,
    /// Tax-exclusive sales amount
    Subtotal,
}

impl AmountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AmountType::Total => "total",
            AmountType::Subtotal => "subtotal",
        }
    }
}

impl fmt::Display for AmountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AmountType {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "total" => Ok(AmountType::Total),
            "subtotal" => Ok(AmountType::Subtotal),
            other => Err(InvoiceError::InvalidEnum {
                field: "amountType",
                value: other.to_string(),
            }),
        }
    }
}

/// Business tax treatment of the sale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxType {
    /// 應稅, standard 5% rate
    #[default]
    Regular,
    /// 零稅率, exported or zero-rated goods
    ZeroRate,
    /// 免稅, no tax is levied at all
    Exempt,
}

impl TaxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxType::Regular => "regular",
            TaxType::ZeroRate => "zero-rate",
            TaxType::Exempt => "exempt",
        }
    }

    /// Rate applied when splitting or grossing up an amount
    pub fn effective_rate(&self) -> Decimal {
        match self {
            TaxType::Regular => Decimal::new(5, 2),
            TaxType::ZeroRate | TaxType::Exempt => Decimal::ZERO,
        }
    }

    /// Rate shown on the form. Exempt sales carry no rate at all.
    pub fn rate_label(&self) -> Option<&'static str> {
        match self {
            TaxType::Regular => Some("5%"),
            TaxType::ZeroRate => Some("0%"),
            TaxType::Exempt => None,
        }
    }

    /// Label printed in the tax treatment column
    pub fn label(&self) -> &'static str {
        match self {
            TaxType::Regular => "應稅",
            TaxType::ZeroRate => "零稅率",
            TaxType::Exempt => "免稅",
        }
    }

    /// Whether a tax amount exists on the form (as opposed to a zero-valued one)
    pub fn levies_tax(&self) -> bool {
        !matches!(self, TaxType::Exempt)
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxType {
    type Err = InvoiceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "regular" => Ok(TaxType::Regular),
            "zero-rate" => Ok(TaxType::ZeroRate),
            "exempt" => Ok(TaxType::Exempt),
            other => Err(InvoiceError::InvalidEnum {
                field: "taxType",
                value: other.to_string(),
            }),
        }
    }
}

/// Canonical amounts in whole NT dollars
///
/// `amount == subtotal + tax` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AmountResult {
    pub subtotal: u64,
    pub tax: u64,
    pub amount: u64,
}

/// Amount resolution utilities
pub struct AmountResolver;

impl AmountResolver {
    /// Resolve a raw user figure into subtotal, tax and total
    pub fn resolve(raw: &str, amount_type: AmountType, tax_type: TaxType) -> Result<AmountResult> {
        resolve_amount(raw, amount_type, tax_type)
    }
}

/// Resolve a raw user figure into subtotal, tax and total
///
/// # Examples
/// ```
/// use invoice_core::{resolve_amount, AmountType, TaxType};
/// let r = resolve_amount("1000", AmountType::Subtotal, TaxType::Regular).unwrap();
/// assert_eq!((r.subtotal, r.tax, r.amount), (1000, 50, 1050));
/// ```
pub fn resolve_amount(
    raw: &str,
    amount_type: AmountType,
    tax_type: TaxType,
) -> Result<AmountResult> {
    let value = parse_whole_units(raw)?;
    let rate = tax_type.effective_rate();
    let overflow = || InvoiceError::InvalidAmount(raw.to_string());

    let (subtotal, tax, amount) = match amount_type {
        AmountType::Total => {
            let net = value
                .checked_div(Decimal::ONE + rate)
                .ok_or_else(overflow)?;
            let subtotal = round_half_up(net);
            let tax = value.checked_sub(subtotal).ok_or_else(overflow)?;
            (subtotal, tax, value)
        }
        AmountType::Subtotal => {
            let tax = round_half_up(value.checked_mul(rate).ok_or_else(overflow)?);
            (value, tax, value.checked_add(tax).ok_or_else(overflow)?)
        }
    };

    Ok(AmountResult {
        subtotal: to_units(subtotal, raw)?,
        tax: to_units(tax, raw)?,
        amount: to_units(amount, raw)?,
    })
}

/// Parse user input and round it to whole currency units
fn parse_whole_units(raw: &str) -> Result<Decimal> {
    let trimmed = raw.trim();
    let value = Decimal::from_str(trimmed)
        .map_err(|_| InvoiceError::InvalidAmount(raw.to_string()))?;

    if value < Decimal::ZERO {
        return Err(InvoiceError::InvalidAmount(raw.to_string()));
    }

    Ok(round_half_up(value))
}

/// Round to whole units, halves go up
fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

fn to_units(value: Decimal, raw: &str) -> Result<u64> {
    value
        .to_u64()
        .ok_or_else(|| InvoiceError::InvalidAmount(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn result(subtotal: u64, tax: u64, amount: u64) -> AmountResult {
        AmountResult {
            subtotal,
            tax,
            amount,
        }
    }

    #[test]
    fn test_total_regular() {
        assert_eq!(
            resolve_amount("1050", AmountType::Total, TaxType::Regular).unwrap(),
            result(1000, 50, 1050)
        );
        assert_eq!(
            resolve_amount("100", AmountType::Total, TaxType::Regular).unwrap(),
            result(95, 5, 100)
        );
    }

    #[test]
    fn test_subtotal_regular() {
        assert_eq!(
            resolve_amount("1000", AmountType::Subtotal, TaxType::Regular).unwrap(),
            result(1000, 50, 1050)
        );
        // 0.05 * 10 = 0.5 rounds up
        assert_eq!(
            resolve_amount("10", AmountType::Subtotal, TaxType::Regular).unwrap(),
            result(10, 1, 11)
        );
        // 0.05 * 9 = 0.45 rounds down
        assert_eq!(
            resolve_amount("9", AmountType::Subtotal, TaxType::Regular).unwrap(),
            result(9, 0, 9)
        );
    }

    #[test]
    fn test_zero_rate_and_exempt() {
        for tax_type in [TaxType::ZeroRate, TaxType::Exempt] {
            assert_eq!(
                resolve_amount("1050", AmountType::Total, tax_type).unwrap(),
                result(1050, 0, 1050)
            );
            assert_eq!(
                resolve_amount("1050", AmountType::Subtotal, tax_type).unwrap(),
                result(1050, 0, 1050)
            );
        }
    }

    #[test]
    fn test_zero_amount() {
        for amount_type in [AmountType::Total, AmountType::Subtotal] {
            assert_eq!(
                resolve_amount("0", amount_type, TaxType::Regular).unwrap(),
                result(0, 0, 0)
            );
        }
    }

    #[test]
    fn test_fractional_input_rounds_half_up() {
        assert_eq!(
            resolve_amount("1049.5", AmountType::Total, TaxType::Regular).unwrap(),
            result(1000, 50, 1050)
        );
        assert_eq!(
            resolve_amount("0.5", AmountType::Subtotal, TaxType::ZeroRate).unwrap(),
            result(1, 0, 1)
        );
        assert_eq!(
            resolve_amount(" 42.49 ", AmountType::Subtotal, TaxType::Exempt).unwrap(),
            result(42, 0, 42)
        );
    }

    #[test]
    fn test_invalid_amount() {
        for raw in ["-5", "abc", "", "12abc", "1,050"] {
            assert_eq!(
                resolve_amount(raw, AmountType::Total, TaxType::Regular),
                Err(InvoiceError::InvalidAmount(raw.to_string())),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_numeric_limits() {
        let max = Decimal::MAX.to_string();
        let too_many_digits = "1".repeat(40);
        let past_u64 = (u128::from(u64::MAX) + 1).to_string();

        for raw in [max.as_str(), too_many_digits.as_str(), past_u64.as_str()] {
            for amount_type in [AmountType::Total, AmountType::Subtotal] {
                assert_eq!(
                    resolve_amount(raw, amount_type, TaxType::Regular),
                    Err(InvoiceError::InvalidAmount(raw.to_string())),
                    "{raw} as {amount_type}"
                );
            }
        }

        let u64_max = u64::MAX.to_string();
        assert_eq!(
            resolve_amount(&u64_max, AmountType::Total, TaxType::ZeroRate).unwrap(),
            result(u64::MAX, 0, u64::MAX)
        );
        assert_eq!(
            resolve_amount(&u64_max, AmountType::Subtotal, TaxType::Regular),
            Err(InvoiceError::InvalidAmount(u64_max.clone()))
        );
    }

    #[test]
    fn test_total_is_idempotent() {
        for raw in 0..5000u64 {
            for tax_type in [TaxType::Regular, TaxType::ZeroRate, TaxType::Exempt] {
                let first =
                    resolve_amount(&raw.to_string(), AmountType::Subtotal, tax_type).unwrap();
                let again =
                    resolve_amount(&first.amount.to_string(), AmountType::Total, tax_type).unwrap();
                assert_eq!(first, again, "subtotal {raw} with {tax_type}");

                let split = resolve_amount(&raw.to_string(), AmountType::Total, tax_type).unwrap();
                let split_again =
                    resolve_amount(&split.amount.to_string(), AmountType::Total, tax_type).unwrap();
                assert_eq!(split, split_again);
                assert_eq!(split.amount, split.subtotal + split.tax);
            }
        }
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("total".parse::<AmountType>().unwrap(), AmountType::Total);
        assert_eq!("subtotal".parse::<AmountType>().unwrap(), AmountType::Subtotal);
        assert_eq!("zero-rate".parse::<TaxType>().unwrap(), TaxType::ZeroRate);
        assert_eq!(
            "Regular".parse::<TaxType>(),
            Err(InvoiceError::InvalidEnum {
                field: "taxType",
                value: "Regular".to_string()
            })
        );
        assert!("gross".parse::<AmountType>().is_err());
    }

    #[test]
    fn test_tax_type_labels() {
        assert_eq!(TaxType::Regular.effective_rate(), dec!(0.05));
        assert_eq!(TaxType::Exempt.effective_rate(), Decimal::ZERO);
        assert_eq!(TaxType::ZeroRate.rate_label(), Some("0%"));
        assert_eq!(TaxType::Exempt.rate_label(), None);
        assert_eq!(TaxType::Exempt.label(), "免稅");
        assert!(TaxType::ZeroRate.levies_tax());
        assert!(!TaxType::Exempt.levies_tax());
    }

    #[test]
    fn test_serde_spelling() {
        assert_eq!(
            serde_json::to_string(&TaxType::ZeroRate).unwrap(),
            "\"zero-rate\""
        );
        assert_eq!(
            serde_json::from_str::<AmountType>("\"subtotal\"").unwrap(),
            AmountType::Subtotal
        );
    }
}
