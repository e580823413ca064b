//! Invoice Render - layout-driven rendering of computed invoices
//!
//! This crate provides:
//! - The [`InvoiceRenderer`] seam between the engine and a rendering technology
//! - Layout JSON schema types and parsing
//! - Data binding via JSONPath-like expressions
//! - An SVG renderer (text, boxed field form, line blocks)
//!
//! # Example
//!
//! ```
//! use invoice_core::{Invoice, InvoiceInput};
//! use invoice_render::{InvoiceRenderer, SvgRenderer};
//!
//! let input = InvoiceInput::from_query_pairs([
//!     ("buyer", "好公司"),
//!     ("date", "2024-03-15"),
//!     ("totalAmount", "1050"),
//! ])?;
//! let invoice = Invoice::build(&input)?;
//! let renderer = SvgRenderer::with_default_layout()?;
//! let svg_bytes = renderer.render(&invoice)?;
//!
//! assert_eq!(renderer.content_type(), "image/svg+xml");
//! assert!(String::from_utf8_lossy(&svg_bytes).contains("113年3-4月"));
//! # Ok::<(), invoice_render::RenderError>(())
//! ```

pub mod binding;
pub mod blocks;
pub mod parser;
mod renderer;
mod schema;

pub use parser::parse_layout;
pub use renderer::SvgRenderer;
pub use schema::*;

use invoice_core::{Invoice, InvoiceError};
use thiserror::Error;

/// Errors that can occur during rendering
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to parse layout: {0}")]
    ParseError(String),

    #[error("Invalid data binding: {0}")]
    BindingError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Invoice error: {0}")]
    Invoice(#[from] InvoiceError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type for render operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Turns a computed invoice into an encoded image
///
/// Implementations receive only the finished [`Invoice`] record and hold no
/// domain logic of their own.
pub trait InvoiceRenderer {
    /// MIME type of the bytes returned by [`InvoiceRenderer::render`]
    fn content_type(&self) -> &'static str;

    /// Render one invoice
    fn render(&self, invoice: &Invoice) -> Result<Vec<u8>>;
}
