//! Modelo de salida del análisis y sus representaciones.

pub mod export;
pub mod mime;
pub mod renderer;
pub mod report;

pub use export::{ExportFormat, export_report, export_report_to_path, parse_export_format};
pub use renderer::render_report;
pub use report::{DiagnosticMap, Metadata};
