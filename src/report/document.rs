//! Declarative report document model.
//!
//! A composed report is plain data: an ordered list of pages, each holding
//! positioned elements. Positions are millimetres from the top-left corner
//! of an A4 portrait page; the renderer flips the axis for PDF output.
//! Keeping layout as data means every page rule is testable without a
//! rendering library, and a shell can hand the document to its own
//! renderer instead of ours.

use serde::{Deserialize, Serialize};

/// A4 portrait metrics shared by the compositor and renderer.
pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const CONTENT_MARGIN_MM: f64 = 20.0;
pub const CONTENT_WIDTH_MM: f64 = PAGE_WIDTH_MM - 2.0 * CONTENT_MARGIN_MM;

/// A complete, ready-to-render report. Recomputed whole on every export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub title: String,
    pub pages: Vec<Page>,
}

/// One page. Every page additionally carries the repeated header wordmark
/// and a centred footer with `number`; both are drawn by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub number: u32,
    pub elements: Vec<PageElement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PageElement {
    Text(TextBlock),
    Table(Table),
    Figure(Figure),
    Callout(Callout),
}

/// Text colour/weight treatment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextStyle {
    /// Body grey, regular weight.
    Body,
    /// Body grey, bold.
    Bold,
    /// Clinic accent green, regular weight.
    Accent,
    /// Clinic accent green, bold.
    AccentBold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f32,
    pub style: TextStyle,
    pub align: Align,
}

impl TextBlock {
    pub fn body(text: impl Into<String>, x: f64, y: f64, size: f32) -> Self {
        Self::styled(text, x, y, size, TextStyle::Body)
    }

    pub fn styled(
        text: impl Into<String>,
        x: f64,
        y: f64,
        size: f32,
        style: TextStyle,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            style,
            align: Align::Left,
        }
    }

    pub fn centered(self) -> Self {
        Self {
            align: Align::Center,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub header: String,
    pub width: f64,
}

impl Column {
    pub fn new(header: impl Into<String>, width: f64) -> Self {
        Self {
            header: header.into(),
            width,
        }
    }
}

/// A grid table. The first column is the shaded label column; at most one
/// body row may carry the highlight fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub x: f64,
    pub y: f64,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub highlighted_row: Option<usize>,
    pub min_row_height: f64,
}

impl Table {
    pub fn new(x: f64, y: f64, columns: Vec<Column>, rows: Vec<Vec<String>>) -> Self {
        Self {
            x,
            y,
            columns,
            rows,
            highlighted_row: None,
            min_row_height: 12.0,
        }
    }

    pub fn with_highlight(self, row: usize) -> Self {
        Self {
            highlighted_row: Some(row),
            ..self
        }
    }

    pub fn with_min_row_height(self, height: f64) -> Self {
        Self {
            min_row_height: height,
            ..self
        }
    }
}

/// A referenced illustration. The document carries the asset path only;
/// embedding the bitmap is the renderer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub source: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A bordered call-out box spanning the content width, text centred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callout {
    pub text: String,
    pub y: f64,
    pub height: f64,
}

impl Page {
    /// Iterate tables on this page, in layout order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Iterate text blocks on this page, in layout order.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.elements.iter().filter_map(|e| match e {
            PageElement::Text(t) => Some(t),
            _ => None,
        })
    }

    /// Whether any text block on the page contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_blocks().any(|t| t.text.contains(needle))
    }
}
