//! WASM bindings for the uniform invoice engine
//!
//! This crate provides JavaScript-friendly API for:
//! - Amount resolution, ROC dates, invoice periods and numeral cells
//! - Building an invoice preview from request parameters
//! - Rendering the preview to SVG
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { InvoiceEngine, InvoicePreview } from 'invoice-wasm';
//!
//! await init();
//!
//! const amounts = InvoiceEngine.resolveAmount("1050", "total", "regular");
//! // { subtotal: 1000, tax: 50, amount: 1050 }
//!
//! const params = Object.fromEntries(new URL(request.url).searchParams);
//! const preview = InvoicePreview.fromQuery(params);
//! const svg = preview.renderSvg();
//! const share = new URLSearchParams(preview.imageQuery());
//! ```

use std::collections::BTreeMap;

use invoice_core::{AmountType, Invoice, InvoiceInput, NumeralFormatter, TaxType};
use invoice_render::{InvoiceRenderer, SvgRenderer};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize with `null` for absent values and plain objects for maps
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

/// Stateless invoice computations
#[wasm_bindgen]
pub struct InvoiceEngine;

#[wasm_bindgen]
impl InvoiceEngine {
    /// Resolve subtotal, tax and total from a user figure
    ///
    /// @param raw - Amount as typed by the user
    /// @param amountType - "total" or "subtotal"
    /// @param taxType - "regular", "zero-rate" or "exempt"
    /// @returns { subtotal, tax, amount }
    #[wasm_bindgen(js_name = resolveAmount)]
    pub fn resolve_amount(
        raw: &str,
        amount_type: &str,
        tax_type: &str,
    ) -> Result<JsValue, JsValue> {
        let amount_type: AmountType = amount_type.parse().map_err(js_error)?;
        let tax_type: TaxType = tax_type.parse().map_err(js_error)?;
        let result =
            invoice_core::resolve_amount(raw, amount_type, tax_type).map_err(js_error)?;
        to_js(&result)
    }

    /// Format a Gregorian date in the ROC calendar
    ///
    /// @param year - Gregorian year
    /// @param month - Month (1-12)
    /// @param day - Day
    /// @returns ROC date (e.g., "113年3月15日")
    #[wasm_bindgen(js_name = rocDate)]
    pub fn roc_date(year: i32, month: u32, day: u32) -> Result<String, JsValue> {
        invoice_core::roc_date(year, month, day)
            .map(|d| d.to_string())
            .map_err(js_error)
    }

    /// Format a JS Date (local time) in the ROC calendar
    ///
    /// @param date - JavaScript Date
    /// @returns ROC date (e.g., "113年3月15日")
    #[wasm_bindgen(js_name = rocDateFromJs)]
    pub fn roc_date_from_js(date: &js_sys::Date) -> Result<String, JsValue> {
        Self::roc_date(
            date.get_full_year() as i32,
            date.get_month() + 1,
            date.get_date(),
        )
    }

    /// Invoice period containing a Gregorian date
    ///
    /// @param year - Gregorian year
    /// @param month - Month (1-12)
    /// @param day - Day
    /// @returns Period (e.g., "113年3-4月")
    #[wasm_bindgen(js_name = invoicePeriod)]
    pub fn invoice_period(year: i32, month: u32, day: u32) -> Result<String, JsValue> {
        invoice_core::invoice_period(year, month, day)
            .map(|p| p.to_string())
            .map_err(js_error)
    }

    /// Numeral cells of the 國字金額 row
    ///
    /// @param amount - Whole, non-negative amount
    /// @returns Array of { digit: string | null, unit: string, show: boolean }
    #[wasm_bindgen(js_name = formatNumerals)]
    pub fn format_numerals(amount: f64) -> Result<JsValue, JsValue> {
        let cells = NumeralFormatter::format_value(amount).map_err(js_error)?;
        to_js(&cells)
    }
}

/// A computed invoice ready to render
#[wasm_bindgen]
pub struct InvoicePreview {
    input: InvoiceInput,
    invoice: Invoice,
}

#[wasm_bindgen]
impl InvoicePreview {
    /// Build a preview from request parameters
    ///
    /// @param params - Object of string parameters (buyer, uniformNumber, date,
    ///   totalAmount, subtotalAmount, amountType, taxType)
    /// @returns InvoicePreview instance
    #[wasm_bindgen(js_name = fromQuery)]
    pub fn from_query(params: JsValue) -> Result<InvoicePreview, JsValue> {
        let params: BTreeMap<String, String> = serde_wasm_bindgen::from_value(params)?;
        let input = InvoiceInput::from_query_pairs(params).map_err(js_error)?;
        Self::from_input(input).map_err(js_error)
    }

    /// Computed invoice as a plain object
    pub fn invoice(&self) -> Result<JsValue, JsValue> {
        to_js(&self.invoice)
    }

    /// Computed invoice as JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.invoice).map_err(js_error)
    }

    /// Render to SVG markup
    ///
    /// @param layoutJson - Optional layout JSON; the built-in layout is used when omitted
    /// @returns SVG string
    #[wasm_bindgen(js_name = renderSvg)]
    pub fn render_svg(&self, layout_json: Option<String>) -> Result<String, JsValue> {
        let renderer = match layout_json {
            Some(json) => SvgRenderer::from_json(&json),
            None => SvgRenderer::with_default_layout(),
        }
        .map_err(js_error)?;

        let bytes = renderer.render(&self.invoice).map_err(js_error)?;
        String::from_utf8(bytes).map_err(js_error)
    }

    /// Parameters that reproduce this preview, for `new URLSearchParams(...)`
    ///
    /// @returns Array of [key, value] pairs
    #[wasm_bindgen(js_name = imageQuery)]
    pub fn image_query(&self) -> js_sys::Array {
        self.input
            .to_query_pairs()
            .into_iter()
            .map(|(key, value)| {
                js_sys::Array::of2(&JsValue::from_str(key), &JsValue::from_str(&value))
            })
            .collect()
    }

    /// File name for the downloaded image
    #[wasm_bindgen(js_name = downloadFileName)]
    pub fn download_file_name(&self) -> String {
        self.invoice.download_file_name()
    }
}

impl InvoicePreview {
    /// Build a preview from already validated input
    pub fn from_input(input: InvoiceInput) -> invoice_core::Result<InvoicePreview> {
        let invoice = Invoice::build(&input)?;
        Ok(InvoicePreview { input, invoice })
    }
}
