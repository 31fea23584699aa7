//! Clasificación del formato a partir de la extensión del nombre de archivo.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    #[serde(rename = "JPEG")]
    Jpeg,
    #[serde(rename = "PNG")]
    Png,
    #[serde(rename = "GIF")]
    Gif,
    #[serde(rename = "BMP")]
    Bmp,
    #[serde(rename = "TIFF")]
    Tiff,
    #[serde(rename = "PCX")]
    Pcx,
    Unknown,
}

impl ImageFormat {
    pub const SUPPORTED: [ImageFormat; 6] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::Gif,
        ImageFormat::Bmp,
        ImageFormat::Tiff,
        ImageFormat::Pcx,
    ];

    /// Clasifica un nombre de archivo por su sufijo, sin distinguir mayúsculas.
    /// Un nombre ausente o con extensión desconocida produce `Unknown`.
    pub fn from_filename(filename: Option<&str>) -> Self {
        let Some(name) = filename else {
            return ImageFormat::Unknown;
        };
        let lower = name.to_lowercase();
        Self::SUPPORTED
            .into_iter()
            .find(|format| {
                format
                    .extensions()
                    .iter()
                    .any(|ext| lower.ends_with(&format!(".{ext}")))
            })
            .unwrap_or(ImageFormat::Unknown)
    }

    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Pcx => "PCX",
            ImageFormat::Unknown => "Unknown",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            ImageFormat::Jpeg => &["jpg", "jpeg"],
            ImageFormat::Png => &["png"],
            ImageFormat::Gif => &["gif"],
            ImageFormat::Bmp => &["bmp"],
            ImageFormat::Tiff => &["tif", "tiff"],
            ImageFormat::Pcx => &["pcx"],
            ImageFormat::Unknown => &[],
        }
    }

    /// Tipo MIME que se declara para archivos de este formato.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
            ImageFormat::Pcx => "image/x-pcx",
            ImageFormat::Unknown => "application/octet-stream",
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
