//! PDF report export
//!
//! [`ReportExporter`] builds the report HTML from a snapshot and hands it to
//! a [`PdfRenderer`]; production uses [`WkHtmlToPdf`].

pub mod error;
pub mod exporter;
pub mod renderer;
pub mod template;

pub use error::ExportError;
pub use exporter::ReportExporter;
pub use renderer::{PdfRenderer, WkHtmlToPdf};
