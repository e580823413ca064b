//! Layout JSON schema types

use serde::{Deserialize, Serialize};

/// Layout modelled on the three-part uniform invoice, 800x600
pub const DEFAULT_LAYOUT: &str = include_str!("../data/default-layout.json");

/// Root layout structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layout {
    /// Schema version
    pub version: String,

    /// Canvas configuration
    pub page: Page,

    /// Font used by blocks that do not specify one
    #[serde(default)]
    pub font: Option<Font>,

    /// How the tax amount of an exempt invoice is presented
    #[serde(rename = "exemptTax")]
    #[serde(default)]
    pub exempt_tax: ExemptTaxDisplay,

    /// Content blocks
    pub blocks: Vec<Block>,

    // === Internal state for fluent API (not serialized) ===
    #[serde(skip)]
    current_font: Option<Font>,
}

impl Layout {
    /// Create an empty layout with the given canvas size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            version: "1.0".to_string(),
            page: Page {
                width,
                height,
                background: None,
            },
            font: None,
            exempt_tax: ExemptTaxDisplay::default(),
            blocks: Vec::new(),
            current_font: None,
        }
    }

    /// Set the font for subsequent insertions
    pub fn set_font(&mut self, family: &str, size: u8) -> &mut Self {
        self.current_font = Some(Font {
            family: family.to_string(),
            size,
            style: FontStyle::Regular,
            color: None,
        });
        self
    }

    /// Set the font style for subsequent insertions
    pub fn set_font_style(&mut self, style: FontStyle) -> &mut Self {
        if let Some(font) = self.current_font.as_mut() {
            font.style = style;
        }
        self
    }

    /// Set the text color for subsequent insertions
    pub fn set_text_color(&mut self, color: &str) -> &mut Self {
        if let Some(font) = self.current_font.as_mut() {
            font.color = Some(color.to_string());
        }
        self
    }

    /// Insert static text at position
    pub fn insert_text(&mut self, text: &str, x: f64, y: f64, align: Align) -> &mut Self {
        self.blocks.push(Block::Text(TextBlock {
            id: None,
            bind: None,
            text: Some(text.to_string()),
            position: Position { x, y },
            font: self.current_font.clone(),
            align,
            format_type: None,
            enable: None,
        }));
        self
    }

    /// Insert text bound to invoice data at position
    pub fn insert_binding(&mut self, bind: &str, x: f64, y: f64, align: Align) -> &mut Self {
        self.blocks.push(Block::Text(TextBlock {
            id: None,
            bind: Some(bind.to_string()),
            text: None,
            position: Position { x, y },
            font: self.current_font.clone(),
            align,
            format_type: None,
            enable: None,
        }));
        self
    }

    /// Insert a row of boxes bound to numeral cells or a string
    pub fn insert_field_form(
        &mut self,
        bind: &str,
        x: f64,
        y: f64,
        cell_width: f64,
        cell_height: f64,
    ) -> &mut Self {
        self.blocks.push(Block::FieldForm(FieldFormBlock {
            id: None,
            bind: Some(bind.to_string()),
            text: None,
            position: Position { x, y },
            font: self.current_font.clone(),
            cell_width,
            cell_height,
            boxes: true,
            units: true,
            enable: None,
        }));
        self
    }

    /// Insert a straight line
    pub fn insert_line(&mut self, from: Position, to: Position) -> &mut Self {
        self.blocks.push(Block::Line(LineBlock {
            id: None,
            from,
            to,
            stroke: default_stroke(),
            width: default_stroke_width(),
        }));
        self
    }
}

/// Canvas configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// Width in pixels
    pub width: f64,

    /// Height in pixels
    pub height: f64,

    /// Background fill (CSS color)
    #[serde(default)]
    pub background: Option<String>,
}

/// Presentation of the tax amount on exempt invoices
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExemptTaxDisplay {
    /// Leave the tax field empty, no tax exists
    #[default]
    Omit,
    /// Print 0 in the tax field
    Zero,
}

/// Content block (tagged union)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    /// Text block
    Text(TextBlock),

    /// Field form block (one box per character or numeral cell)
    #[serde(rename = "fieldform")]
    FieldForm(FieldFormBlock),

    /// Line block (table rules, separators)
    Line(LineBlock),
}

/// Position in canvas coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// X coordinate in pixels
    pub x: f64,

    /// Y coordinate in pixels (from top, text baseline)
    pub y: f64,
}

/// Font specification for a block
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Font {
    /// Font family name
    pub family: String,

    /// Font size in pixels
    #[serde(default = "default_font_size")]
    pub size: u8,

    /// Font style
    #[serde(default)]
    pub style: FontStyle,

    /// Text color (CSS color)
    #[serde(default)]
    pub color: Option<String>,
}

fn default_font_size() -> u8 {
    16
}

/// Font style
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Regular,
    Medium,
    Bold,
}

impl FontStyle {
    /// CSS `font-weight` value
    pub fn weight(&self) -> &'static str {
        match self {
            FontStyle::Regular => "400",
            FontStyle::Medium => "500",
            FontStyle::Bold => "700",
        }
    }
}

/// Text alignment
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// SVG `text-anchor` value
    pub fn text_anchor(&self) -> &'static str {
        match self {
            Align::Left => "start",
            Align::Center => "middle",
            Align::Right => "end",
        }
    }
}

/// Special format types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FormatType {
    /// Whole amount with thousand separators
    Thousands,
    /// Full-width blank when the value is empty
    OrBlank,
}

/// Text block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBlock {
    /// Block identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Data binding path (JSONPath-like)
    #[serde(default)]
    pub bind: Option<String>,

    /// Static text (used if bind is not specified)
    #[serde(default)]
    pub text: Option<String>,

    /// Position
    pub position: Position,

    /// Font specification
    #[serde(default)]
    pub font: Option<Font>,

    /// Text alignment
    #[serde(default)]
    pub align: Align,

    /// Special format type
    #[serde(rename = "formatType")]
    #[serde(default)]
    pub format_type: Option<FormatType>,

    /// Optional enable flag - if set, evaluates binding to determine if block is rendered
    /// If the bound value is falsy (null, false, 0, empty string), block is not rendered
    #[serde(default)]
    pub enable: Option<String>,
}

/// Field form block, one box per numeral cell or per character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFormBlock {
    /// Block identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Data binding path, to an array of numeral cells or to a string
    #[serde(default)]
    pub bind: Option<String>,

    /// Static text
    #[serde(default)]
    pub text: Option<String>,

    /// Top-left corner of the first box
    pub position: Position,

    /// Font specification
    #[serde(default)]
    pub font: Option<Font>,

    /// Box width
    #[serde(rename = "cellWidth")]
    pub cell_width: f64,

    /// Box height
    #[serde(rename = "cellHeight")]
    pub cell_height: f64,

    /// Draw box outlines
    #[serde(default = "default_true")]
    pub boxes: bool,

    /// Print the positional unit under each numeral box
    #[serde(default = "default_true")]
    pub units: bool,

    /// Optional enable flag
    #[serde(default)]
    pub enable: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Line block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineBlock {
    /// Block identifier
    #[serde(default)]
    pub id: Option<String>,

    /// Start point
    pub from: Position,

    /// End point
    pub to: Position,

    /// Stroke color (CSS color)
    #[serde(default = "default_stroke")]
    pub stroke: String,

    /// Stroke width in pixels
    #[serde(default = "default_stroke_width")]
    pub width: f64,
}

fn default_stroke() -> String {
    "#d1d5db".to_string()
}

fn default_stroke_width() -> f64 {
    1.0
}

impl Block {
    /// Get the block ID if present
    pub fn id(&self) -> Option<&str> {
        match self {
            Block::Text(b) => b.id.as_deref(),
            Block::FieldForm(b) => b.id.as_deref(),
            Block::Line(b) => b.id.as_deref(),
        }
    }

    /// Get the data binding path if present
    pub fn bind(&self) -> Option<&str> {
        match self {
            Block::Text(b) => b.bind.as_deref(),
            Block::FieldForm(b) => b.bind.as_deref(),
            Block::Line(_) => None,
        }
    }

    /// Get the enable binding if present
    pub fn enable(&self) -> Option<&str> {
        match self {
            Block::Text(b) => b.enable.as_deref(),
            Block::FieldForm(b) => b.enable.as_deref(),
            Block::Line(_) => None,
        }
    }
}
