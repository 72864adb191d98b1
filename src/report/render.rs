//! PDF rendering of a composed [`ReportDocument`], plus export helpers.
//!
//! The renderer is a dumb consumer: it walks the page elements and draws
//! them with printpdf's builtin Helvetica faces. All layout decisions were
//! made during composition. Document y coordinates are measured from the
//! top edge; PDF space measures from the bottom, so every y is flipped
//! here.

use std::io::BufWriter;
use std::path::{Path, PathBuf};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Polygon, Rgb,
};
use thiserror::Error;

use super::document::{
    Align, Callout, Figure, Page, PageElement, ReportDocument, Table, TextBlock, TextStyle,
    CONTENT_MARGIN_MM, CONTENT_WIDTH_MM, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Clinic wordmark drawn in the repeated page header.
const HEADER_WORDMARK: &str = "DNA Health";
const HEADER_BASELINE_MM: f64 = 18.0;
const HEADER_RULE_MM: f64 = 22.0;
const FOOTER_BASELINE_MM: f64 = 280.0;

const CELL_PADDING_MM: f64 = 5.0;
const TABLE_FONT_SIZE: f32 = 10.0;
const TABLE_LINE_HEIGHT_MM: f64 = 4.5;

/// Average Helvetica glyph width as a fraction of the font size; close
/// enough for footer centring and cell wrapping.
const GLYPH_WIDTH_EM: f64 = 0.5;
const MM_PER_PT: f64 = 0.352778;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the document to PDF bytes.
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        &document.title,
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Page 1",
    );
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_err)?,
    };

    for (i, page) in document.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_idx, layer_idx) = doc.add_page(
                Mm(PAGE_WIDTH_MM as f32),
                Mm(PAGE_HEIGHT_MM as f32),
                format!("Page {}", i + 1),
            );
            doc.get_page(page_idx).get_layer(layer_idx)
        };
        draw_page(&layer, page, &fonts);
    }

    tracing::debug!(pages = document.pages.len(), "report rendered");

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(pdf_err)?;
    buf.into_inner().map_err(|e| ReportError::Pdf(e.to_string()))
}

/// `<name-with-underscores>_Medical_Report.pdf`
pub fn report_filename(patient_name: &str) -> String {
    let underscored = patient_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{underscored}_Medical_Report.pdf")
}

/// Write PDF bytes beneath the exports directory, creating it if needed.
pub fn export_pdf_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    exports_dir: &Path,
) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(exports_dir)?;
    let path = exports_dir.join(filename);
    std::fs::write(&path, pdf_bytes)?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(path)
}

fn pdf_err(e: printpdf::Error) -> ReportError {
    ReportError::Pdf(e.to_string())
}

// ── Page drawing ────────────────────────────────────────────────────────────

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    draw_header(layer, fonts);

    for element in &page.elements {
        match element {
            PageElement::Text(block) => draw_text_block(layer, block, fonts),
            PageElement::Table(table) => draw_table(layer, table, fonts),
            PageElement::Figure(figure) => draw_figure(layer, figure, fonts),
            PageElement::Callout(callout) => draw_callout(layer, callout, fonts),
        }
    }

    draw_footer(layer, page.number, fonts);
}

fn draw_header(layer: &PdfLayerReference, fonts: &Fonts) {
    layer.set_fill_color(accent());
    layer.use_text(
        HEADER_WORDMARK,
        16.0,
        Mm(CONTENT_MARGIN_MM as f32),
        flip(HEADER_BASELINE_MM),
        &fonts.bold,
    );

    layer.set_outline_color(accent());
    layer.set_outline_thickness(1.0);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(CONTENT_MARGIN_MM as f32), flip(HEADER_RULE_MM)), false),
            (
                Point::new(Mm((PAGE_WIDTH_MM - CONTENT_MARGIN_MM) as f32), flip(HEADER_RULE_MM)),
                false,
            ),
        ],
        is_closed: false,
    });
}

fn draw_footer(layer: &PdfLayerReference, number: u32, fonts: &Fonts) {
    let text = number.to_string();
    layer.set_fill_color(body_grey());
    layer.use_text(
        text.clone(),
        10.0,
        Mm(centered_x(&text, 10.0, PAGE_WIDTH_MM / 2.0) as f32),
        flip(FOOTER_BASELINE_MM),
        &fonts.regular,
    );
}

fn draw_text_block(layer: &PdfLayerReference, block: &TextBlock, fonts: &Fonts) {
    let (color, font) = match block.style {
        TextStyle::Body => (body_grey(), &fonts.regular),
        TextStyle::Bold => (body_grey(), &fonts.bold),
        TextStyle::Accent => (accent(), &fonts.regular),
        TextStyle::AccentBold => (accent(), &fonts.bold),
    };
    let x = match block.align {
        Align::Left => block.x,
        Align::Center => centered_x(&block.text, block.size, block.x),
    };

    layer.set_fill_color(color);
    layer.use_text(&block.text, block.size.into(), Mm(x as f32), flip(block.y), font);
}

fn draw_table(layer: &PdfLayerReference, table: &Table, fonts: &Fonts) {
    let row_height = table.min_row_height.max(12.0);
    let header_height = 12.0;

    // Header row: accent fill, white bold labels.
    let mut cell_x = table.x;
    for column in &table.columns {
        fill_rect(layer, cell_x, table.y, column.width, header_height, accent());
        layer.set_fill_color(white());
        layer.use_text(
            &column.header,
            TABLE_FONT_SIZE.into(),
            Mm((cell_x + CELL_PADDING_MM) as f32),
            flip(table.y + 7.0),
            &fonts.bold,
        );
        cell_x += column.width;
    }

    // Body rows.
    let mut row_y = table.y + header_height;
    for (row_index, row) in table.rows.iter().enumerate() {
        let highlighted = table.highlighted_row == Some(row_index);
        let mut cell_x = table.x;
        for (col_index, column) in table.columns.iter().enumerate() {
            if highlighted {
                fill_rect(layer, cell_x, row_y, column.width, row_height, highlight());
            } else if col_index == 0 {
                fill_rect(layer, cell_x, row_y, column.width, row_height, label_fill());
            }

            if let Some(value) = row.get(col_index) {
                let max_chars = wrap_width_chars(column.width);
                layer.set_fill_color(cell_grey());
                for (line_index, line) in wrap_text(value, max_chars).iter().enumerate() {
                    layer.use_text(
                        line,
                        TABLE_FONT_SIZE.into(),
                        Mm((cell_x + CELL_PADDING_MM) as f32),
                        flip(row_y + 7.0 + line_index as f64 * TABLE_LINE_HEIGHT_MM),
                        &fonts.regular,
                    );
                }
            }
            cell_x += column.width;
        }
        row_y += row_height;
    }

    // Grid on top of the fills.
    let total_width: f64 = table.columns.iter().map(|c| c.width).sum();
    let total_height = header_height + row_height * table.rows.len() as f64;
    layer.set_outline_color(grid_grey());
    layer.set_outline_thickness(0.2);

    let mut x = table.x;
    for column in &table.columns {
        stroke_rect(layer, x, table.y, column.width, total_height);
        x += column.width;
    }
    let mut y = table.y;
    stroke_rect(layer, table.x, y, total_width, header_height);
    y += header_height;
    for _ in &table.rows {
        stroke_rect(layer, table.x, y, total_width, row_height);
        y += row_height;
    }
}

/// Figures render as a framed placeholder carrying the asset path; the
/// embedding shell's renderer substitutes the bitmap.
fn draw_figure(layer: &PdfLayerReference, figure: &Figure, fonts: &Fonts) {
    layer.set_outline_color(accent());
    layer.set_outline_thickness(0.5);
    stroke_rect(layer, figure.x, figure.y, figure.width, figure.height);

    layer.set_fill_color(body_grey());
    layer.use_text(
        &figure.source,
        8.0,
        Mm(centered_x(&figure.source, 8.0, figure.x + figure.width / 2.0) as f32),
        flip(figure.y + figure.height / 2.0),
        &fonts.regular,
    );
}

fn draw_callout(layer: &PdfLayerReference, callout: &Callout, fonts: &Fonts) {
    layer.set_outline_color(accent());
    layer.set_outline_thickness(1.0);
    stroke_rect(
        layer,
        CONTENT_MARGIN_MM,
        callout.y,
        CONTENT_WIDTH_MM,
        callout.height,
    );

    let lines: Vec<&str> = callout.text.split('\n').collect();
    let line_height = 7.0;
    let text_height = lines.len() as f64 * line_height;
    let first_baseline = callout.y + (callout.height - text_height) / 2.0 + 5.0;

    layer.set_fill_color(accent());
    for (i, line) in lines.iter().enumerate() {
        layer.use_text(
            *line,
            14.0,
            Mm(centered_x(line, 14.0, PAGE_WIDTH_MM / 2.0) as f32),
            flip(first_baseline + i as f64 * line_height),
            &fonts.bold,
        );
    }
}

// ── Drawing primitives ──────────────────────────────────────────────────────

fn flip(top_mm: f64) -> Mm {
    Mm((PAGE_HEIGHT_MM - top_mm) as f32)
}

fn rect_points(x: f64, y_top: f64, width: f64, height: f64) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x as f32), flip(y_top)), false),
        (Point::new(Mm((x + width) as f32), flip(y_top)), false),
        (Point::new(Mm((x + width) as f32), flip(y_top + height)), false),
        (Point::new(Mm(x as f32), flip(y_top + height)), false),
    ]
}

fn fill_rect(layer: &PdfLayerReference, x: f64, y_top: f64, width: f64, height: f64, color: Color) {
    layer.set_fill_color(color);
    layer.add_polygon(Polygon {
        rings: vec![rect_points(x, y_top, width, height)],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    });
}

fn stroke_rect(layer: &PdfLayerReference, x: f64, y_top: f64, width: f64, height: f64) {
    layer.add_line(Line {
        points: rect_points(x, y_top, width, height),
        is_closed: true,
    });
}

fn centered_x(text: &str, size: f32, center: f64) -> f64 {
    let width = text.chars().count() as f64 * size as f64 * MM_PER_PT * GLYPH_WIDTH_EM;
    center - width / 2.0
}

fn wrap_width_chars(column_width: f64) -> usize {
    let glyph = TABLE_FONT_SIZE as f64 * MM_PER_PT * GLYPH_WIDTH_EM;
    (((column_width - 2.0 * CELL_PADDING_MM) / glyph).floor() as usize).max(1)
}

/// Simple word-wrap helper for PDF text rendering.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// ── Palette ─────────────────────────────────────────────────────────────────

fn accent() -> Color {
    Color::Rgb(Rgb::new(153.0 / 255.0, 188.0 / 255.0, 68.0 / 255.0, None))
}

fn body_grey() -> Color {
    Color::Rgb(Rgb::new(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0, None))
}

fn cell_grey() -> Color {
    Color::Rgb(Rgb::new(60.0 / 255.0, 60.0 / 255.0, 60.0 / 255.0, None))
}

fn grid_grey() -> Color {
    Color::Rgb(Rgb::new(180.0 / 255.0, 180.0 / 255.0, 180.0 / 255.0, None))
}

fn label_fill() -> Color {
    Color::Rgb(Rgb::new(240.0 / 255.0, 250.0 / 255.0, 230.0 / 255.0, None))
}

fn highlight() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 200.0 / 255.0, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}
