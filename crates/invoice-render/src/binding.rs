//! Binding data exposed to layouts
//!
//! Layout blocks address these fields with `$.name` paths:
//!
//! | Path | Value |
//! |------|-------|
//! | `$.title` | `統一發票（三聯式）` |
//! | `$.period` | `113年3-4月` |
//! | `$.date` | `113年3月15日` |
//! | `$.isoDate` | `2024-03-15` |
//! | `$.buyer`, `$.uniformNumber` | as entered |
//! | `$.subtotal`, `$.amount` | whole NT dollars |
//! | `$.tax` | whole NT dollars, `null` for exempt invoices under [`ExemptTaxDisplay::Omit`] |
//! | `$.taxType` | `regular`, `zero-rate` or `exempt` |
//! | `$.taxLabel` | `應稅`, `零稅率` or `免稅` |
//! | `$.taxRate` | `5%`, `0%` or `null` |
//! | `$.numerals` | numeral cells, most significant first |

use invoice_core::{Invoice, INVOICE_TITLE};
use serde_json::{json, Value};

use crate::ExemptTaxDisplay;

/// Build the binding document for one invoice
pub fn invoice_data(invoice: &Invoice, exempt_tax: ExemptTaxDisplay) -> Value {
    let tax = match (invoice.tax_type.levies_tax(), exempt_tax) {
        (false, ExemptTaxDisplay::Omit) => Value::Null,
        _ => json!(invoice.amounts.tax),
    };

    json!({
        "title": INVOICE_TITLE,
        "period": invoice.period.to_string(),
        "date": invoice.roc_date.to_string(),
        "isoDate": invoice.date.format("%Y-%m-%d").to_string(),
        "buyer": invoice.buyer,
        "uniformNumber": invoice.uniform_number,
        "subtotal": invoice.amounts.subtotal,
        "tax": tax,
        "amount": invoice.amounts.amount,
        "taxType": invoice.tax_type,
        "taxLabel": invoice.tax_type.label(),
        "taxRate": invoice.tax_type.rate_label(),
        "numerals": invoice.numerals,
    })
}
