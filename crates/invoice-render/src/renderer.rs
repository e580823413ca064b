//! SVG rendering of layouts

use invoice_core::Invoice;
use serde_json::Value;
use svg::node::element::{Group, Line, Rectangle, Text};
use svg::node::Text as TextNode;
use svg::Document;

use crate::binding::invoice_data;
use crate::blocks::{FieldContent, TextContent};
use crate::parser::{is_truthy, parse_layout, resolve_binding};
use crate::schema::*;
use crate::{InvoiceRenderer, RenderError, Result};

const DEFAULT_FONT_FAMILY: &str = "Noto Sans TC";
const DEFAULT_TEXT_COLOR: &str = "#111827";
const BLANK_CELL_FILL: &str = "#f3f4f6";

/// Renders invoices to SVG following a [`Layout`]
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    layout: Layout,
}

impl SvgRenderer {
    /// Create a renderer for a layout
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Create a renderer from layout JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_layout(json)?))
    }

    /// Create a renderer for the embedded uniform invoice layout
    pub fn with_default_layout() -> Result<Self> {
        Self::from_json(DEFAULT_LAYOUT)
    }

    /// The layout being rendered
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Render an invoice into an SVG document
    pub fn render_document(&self, invoice: &Invoice) -> Result<Document> {
        let data = invoice_data(invoice, self.layout.exempt_tax);
        self.render_data(&data)
    }

    /// Render an invoice into SVG markup
    pub fn render_string(&self, invoice: &Invoice) -> Result<String> {
        Ok(self.render_document(invoice)?.to_string())
    }

    /// Render arbitrary binding data
    ///
    /// # Arguments
    /// * `data` - Data for binding, shaped like [`invoice_data`]'s output
    pub fn render_data(&self, data: &Value) -> Result<Document> {
        let page = &self.layout.page;
        if page.width <= 0.0 || page.height <= 0.0 {
            return Err(RenderError::RenderError(format!(
                "Invalid page size {}x{}",
                page.width, page.height
            )));
        }

        let mut document = Document::new()
            .set("width", page.width)
            .set("height", page.height)
            .set("viewBox", (0.0, 0.0, page.width, page.height));

        if let Some(background) = &page.background {
            document = document.add(
                Rectangle::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .set("fill", escape_xml(background)),
            );
        }

        for block in &self.layout.blocks {
            if !self.is_block_enabled(block, data) {
                continue;
            }
            if let Some(group) = self.render_block(block, data)? {
                document = document.add(group);
            }
        }

        Ok(document)
    }

    /// Check if a block is enabled based on its enable binding
    fn is_block_enabled(&self, block: &Block, data: &Value) -> bool {
        match block.enable() {
            None => true,
            Some(bind) => resolve_binding(bind, data).is_some_and(is_truthy),
        }
    }

    /// Render a single block
    fn render_block(&self, block: &Block, data: &Value) -> Result<Option<Group>> {
        if let Some(bind) = block.bind() {
            if resolve_binding(bind, data).is_none() {
                tracing::warn!(bind, block = ?block.id(), "layout binding resolved to nothing");
            }
        }

        let group = match block {
            Block::Text(b) => self.render_text_block(b, data),
            Block::FieldForm(b) => self.render_fieldform_block(b, data)?,
            Block::Line(b) => Some(Group::new().add(render_line(b))),
        };

        Ok(group.map(|g| match block.id() {
            Some(id) => g.set("id", id),
            None => g,
        }))
    }

    /// Render a text block
    fn render_text_block(&self, block: &TextBlock, data: &Value) -> Option<Group> {
        let text = block.get_text(data).filter(|t| !t.is_empty())?;
        let font = self.font_for(block.font.as_ref());

        Some(Group::new().add(text_element(
            &text,
            block.position.x,
            block.position.y,
            block.align,
            &font,
        )))
    }

    /// Render a field form block
    fn render_fieldform_block(
        &self,
        block: &FieldFormBlock,
        data: &Value,
    ) -> Result<Option<Group>> {
        if block.cell_width <= 0.0 || block.cell_height <= 0.0 {
            return Err(RenderError::RenderError(format!(
                "Field form {:?} needs a positive cell size",
                block.id
            )));
        }

        let Some(content) = block.content(data) else {
            return Ok(None);
        };

        let font = self.font_for(block.font.as_ref());
        let (x0, y0) = (block.position.x, block.position.y);
        let (w, h) = (block.cell_width, block.cell_height);
        let baseline = y0 + h / 2.0 + f64::from(font.size) / 3.0;
        let mut group = Group::new();

        match content {
            FieldContent::Numerals(cells) => {
                for (i, cell) in cells.iter().enumerate() {
                    let x = x0 + w * i as f64;
                    if block.boxes {
                        let fill = if cell.show { "none" } else { BLANK_CELL_FILL };
                        group = group.add(cell_box(x, y0, w, h, fill));
                    }
                    if let (true, Some(digit)) = (cell.show, cell.digit) {
                        group = group.add(text_element(
                            &digit.to_string(),
                            x + w / 2.0,
                            baseline,
                            Align::Center,
                            &font,
                        ));
                    }
                    if block.units {
                        let unit_font = Font {
                            size: font.size.saturating_sub(4).max(8),
                            ..font.clone()
                        };
                        group = group.add(text_element(
                            &cell.unit.to_string(),
                            x + w / 2.0,
                            y0 + h + f64::from(unit_font.size) + 4.0,
                            Align::Center,
                            &unit_font,
                        ));
                    }
                }
            }
            FieldContent::Chars(chars) => {
                for (i, ch) in chars.iter().enumerate() {
                    let x = x0 + w * i as f64;
                    if block.boxes {
                        group = group.add(cell_box(x, y0, w, h, "none"));
                    }
                    group = group.add(text_element(
                        &ch.to_string(),
                        x + w / 2.0,
                        baseline,
                        Align::Center,
                        &font,
                    ));
                }
            }
        }

        Ok(Some(group))
    }

    /// Block font, falling back to the layout font
    fn font_for(&self, font: Option<&Font>) -> Font {
        font.or(self.layout.font.as_ref())
            .cloned()
            .unwrap_or_else(|| Font {
                family: DEFAULT_FONT_FAMILY.to_string(),
                size: 16,
                style: FontStyle::Regular,
                color: None,
            })
    }
}

impl InvoiceRenderer for SvgRenderer {
    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }

    fn render(&self, invoice: &Invoice) -> Result<Vec<u8>> {
        let markup = self.render_string(invoice)?;
        tracing::debug!(bytes = markup.len(), period = %invoice.period, "rendered invoice svg");
        Ok(markup.into_bytes())
    }
}

fn text_element(content: &str, x: f64, y: f64, align: Align, font: &Font) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", align.text_anchor())
        .set("font-family", escape_xml(&font.family))
        .set("font-size", f64::from(font.size))
        .set("font-weight", font.style.weight())
        .set("fill", escape_xml(font.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR)))
        .add(TextNode::new(escape_xml(content)))
}

/// Escape text for use in SVG character data and attribute values
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn cell_box(x: f64, y: f64, width: f64, height: f64, fill: &str) -> Rectangle {
    Rectangle::new()
        .set("x", x)
        .set("y", y)
        .set("width", width)
        .set("height", height)
        .set("fill", fill)
        .set("stroke", "#9ca3af")
        .set("stroke-width", 1.0)
}

fn render_line(block: &LineBlock) -> Line {
    Line::new()
        .set("x1", block.from.x)
        .set("y1", block.from.y)
        .set("x2", block.to.x)
        .set("y2", block.to.y)
        .set("stroke", escape_xml(&block.stroke))
        .set("stroke-width", block.width)
}
