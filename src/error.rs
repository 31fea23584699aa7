//! Tipos de error de la biblioteca.

use std::path::PathBuf;
use thiserror::Error;

/// Fallos por archivo durante el análisis. Nunca salen del agregador: se
/// convierten en metadata parcial.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("internal failure during analysis: {0}")]
    Panicked(String),
}

/// Fallos al reunir archivos de entrada.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("could not read `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not walk directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid ZIP archive `{path}`: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("path `{0}` does not exist or is neither a file nor a directory")]
    NotFound(PathBuf),
}

/// Fallos al exportar el reporte.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    #[error("could not serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not write report: {0}")]
    Io(#[from] std::io::Error),
}
