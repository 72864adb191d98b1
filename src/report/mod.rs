//! Report compositor and renderer.
//!
//! `compose` turns a form payload + medication catalog into a declarative
//! [`document::ReportDocument`]; `render` turns that document into PDF
//! bytes. Composition is pure and deterministic — rendering is the only
//! place a PDF library appears.

pub mod compose;
pub mod document;
pub mod render;

pub use compose::compose_report;
pub use document::{Page, PageElement, ReportDocument};
pub use render::{export_pdf_to_file, render_pdf, report_filename, ReportError};
