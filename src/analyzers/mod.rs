//! Analizadores estructurales por formato.
//!
//! Cada formato se selecciona una sola vez con [`ImageFormat::from_filename`];
//! a partir de ahí el formato decide qué analizador aporta la compresión y el
//! mapa de diagnóstico.

pub mod bmp;
pub mod format;
pub mod gif;
pub mod jpeg;
pub mod labels;
pub mod pcx;
pub mod png;
pub mod reader;
pub mod tiff;

pub use format::ImageFormat;
pub use tiff::compression_only as tiff_compression_only;

use crate::metadata::DiagnosticMap;

impl ImageFormat {
    /// Descripción de la compresión para el campo `compression` de la metadata.
    pub fn compression(self, data: &[u8]) -> Option<String> {
        match self {
            ImageFormat::Jpeg => Some("JPEG".to_string()),
            ImageFormat::Png => Some("Deflate".to_string()),
            ImageFormat::Gif => Some("LZW".to_string()),
            ImageFormat::Bmp => Some(bmp::compression(data)),
            ImageFormat::Tiff => Some(tiff::compression_only(data)),
            ImageFormat::Pcx => Some(pcx::compression(data)),
            ImageFormat::Unknown => None,
        }
    }

    /// Mapa de diagnóstico del analizador del formato. BMP y PCX solo aportan
    /// compresión y devuelven `None`.
    pub fn diagnostics(self, data: &[u8]) -> Option<DiagnosticMap> {
        match self {
            ImageFormat::Gif => Some(gif::analyze(data)),
            ImageFormat::Jpeg => Some(jpeg::analyze(data)),
            ImageFormat::Tiff => Some(tiff::analyze(data)),
            ImageFormat::Png => Some(png::analyze(data)),
            ImageFormat::Bmp | ImageFormat::Pcx | ImageFormat::Unknown => None,
        }
    }
}

fn put(info: &mut DiagnosticMap, label: &str, value: impl Into<String>) {
    info.insert(label.to_string(), value.into());
}
