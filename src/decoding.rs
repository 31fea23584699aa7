//! Decodificación genérica de cabeceras con el crate `image`.
//!
//! Solo se leen dimensiones y disposición de píxeles; los datos de imagen no
//! se descomprimen. Lo que `image` no sabe abrir se intenta como cabecera PCX.

use crate::analyzers::reader::{read_u16, read_u8};
use crate::error::AnalysisError;
use image::{ColorType, ImageDecoder, ImageReader};
use std::io::Cursor;

/// Dimensiones y formato de píxel obtenidos del decodificador genérico.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u16,
    pub layout: String,
}

impl DecodedImage {
    /// `W×H`
    pub fn dimensions(&self) -> String {
        format!("{}×{}", self.width, self.height)
    }

    /// `24 bit [RGB]`
    pub fn color_depth(&self) -> String {
        if self.layout.is_empty() {
            format!("{} bit", self.bits_per_pixel)
        } else {
            format!("{} bit [{}]", self.bits_per_pixel, self.layout)
        }
    }
}

pub trait PixelDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, AnalysisError>;
}

/// Decodificador respaldado por `image`, que detecta el formato por contenido.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageCrateDecoder;

impl PixelDecoder for ImageCrateDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedImage, AnalysisError> {
        let decoder = match ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?
            .into_decoder()
        {
            Ok(decoder) => decoder,
            Err(err) => return pcx_header(data).ok_or(AnalysisError::Decode(err)),
        };

        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();

        Ok(DecodedImage {
            width,
            height,
            bits_per_pixel: decoder.original_color_type().bits_per_pixel(),
            layout: layout_label(color_type).to_string(),
        })
    }
}

const PCX_MANUFACTURER: u8 = 0x0A;
const PCX_HEADER_LEN: usize = 128;
const PCX_BITS_PER_PLANE: usize = 3;
const PCX_WINDOW: usize = 4;
const PCX_PLANES: usize = 65;

/// Cabecera PCX de 128 bytes: ventana `xmin..=xmax`, `ymin..=ymax` en
/// little endian, bits por plano en el byte 3 y planos en el byte 65.
fn pcx_header(data: &[u8]) -> Option<DecodedImage> {
    if data.len() < PCX_HEADER_LEN || data[0] != PCX_MANUFACTURER {
        return None;
    }

    let bits = read_u8(data, PCX_BITS_PER_PLANE);
    let planes = read_u8(data, PCX_PLANES);
    if !matches!(bits, 1 | 2 | 4 | 8) || !(1..=4).contains(&planes) {
        return None;
    }

    let x_min = read_u16(data, PCX_WINDOW, true);
    let y_min = read_u16(data, PCX_WINDOW + 2, true);
    let x_max = read_u16(data, PCX_WINDOW + 4, true);
    let y_max = read_u16(data, PCX_WINDOW + 6, true);
    let width = x_max.checked_sub(x_min)? as u32 + 1;
    let height = y_max.checked_sub(y_min)? as u32 + 1;

    let layout = match (bits, planes) {
        (1, 1) => "Monochrome",
        (8, 3) => "RGB",
        (8, 4) => "RGBA",
        _ if bits as u16 * planes as u16 <= 8 => "Indexed",
        _ => "",
    };

    Some(DecodedImage {
        width,
        height,
        bits_per_pixel: bits as u16 * planes as u16,
        layout: layout.to_string(),
    })
}

fn layout_label(color_type: ColorType) -> &'static str {
    match color_type {
        ColorType::L8 => "Grayscale",
        ColorType::La8 => "Grayscale+Alpha",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "Grayscale 16-bit",
        ColorType::La16 => "Grayscale+Alpha 16-bit",
        ColorType::Rgb16 => "RGB 16-bit",
        ColorType::Rgba16 => "RGBA 16-bit",
        ColorType::Rgb32F => "RGB float",
        ColorType::Rgba32F => "RGBA float",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage, RgbaImage};

    fn encode(image: impl Into<image::DynamicImage>, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image
            .into()
            .write_to(&mut out, format)
            .expect("la codificación en memoria no falla");
        out.into_inner()
    }

    #[test]
    fn reads_png_dimensions_and_layout() -> Result<(), AnalysisError> {
        let data = encode(RgbaImage::new(12, 7), ImageFormat::Png);
        let decoded = ImageCrateDecoder.decode(&data)?;

        assert_eq!(decoded.dimensions(), "12×7");
        assert_eq!(decoded.color_depth(), "32 bit [RGBA]");
        Ok(())
    }

    #[test]
    fn reads_bmp_without_filename_hint() -> Result<(), AnalysisError> {
        let data = encode(RgbImage::new(3, 5), ImageFormat::Bmp);
        let decoded = ImageCrateDecoder.decode(&data)?;

        assert_eq!((decoded.width, decoded.height), (3, 5));
        assert_eq!(decoded.layout, "RGB");
        Ok(())
    }

    fn pcx(bits: u8, planes: u8, window: [u16; 4]) -> Vec<u8> {
        let mut data = vec![0_u8; 128];
        data[0] = 0x0A;
        data[1] = 5;
        data[2] = 1;
        data[3] = bits;
        for (index, value) in window.iter().enumerate() {
            data[4 + index * 2..6 + index * 2].copy_from_slice(&value.to_le_bytes());
        }
        data[65] = planes;
        data.extend_from_slice(&[0xC2, 0x00, 0xC2, 0x00, 0xC2, 0x00]);
        data
    }

    #[test]
    fn reads_pcx_header_window() -> Result<(), AnalysisError> {
        let decoded = ImageCrateDecoder.decode(&pcx(8, 3, [10, 20, 49, 29]))?;
        assert_eq!(decoded.dimensions(), "40×10");
        assert_eq!(decoded.color_depth(), "24 bit [RGB]");

        let decoded = ImageCrateDecoder.decode(&pcx(1, 1, [0, 0, 0, 0]))?;
        assert_eq!(decoded.dimensions(), "1×1");
        assert_eq!(decoded.color_depth(), "1 bit [Monochrome]");

        let decoded = ImageCrateDecoder.decode(&pcx(4, 1, [0, 0, 7, 7]))?;
        assert_eq!(decoded.layout, "Indexed");
        Ok(())
    }

    #[test]
    fn malformed_pcx_header_is_a_decode_error() {
        let inverted = pcx(8, 3, [5, 0, 1, 0]);
        assert!(ImageCrateDecoder.decode(&inverted).is_err());

        let bad_planes = pcx(8, 9, [0, 0, 0, 0]);
        assert!(ImageCrateDecoder.decode(&bad_planes).is_err());

        let truncated = &pcx(8, 3, [0, 0, 0, 0])[..64];
        assert!(ImageCrateDecoder.decode(truncated).is_err());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let result = ImageCrateDecoder.decode(b"definitely not an image");
        assert!(matches!(result, Err(AnalysisError::Decode(_))));
    }
}
