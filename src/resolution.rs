//! Resolución genérica leída de las etiquetas EXIF/TIFF con `kamadak-exif`.

use crate::analyzers::labels::NO_RESOLUTION;
use exif::{Exif, Field, In, Tag, Value};
use std::io::Cursor;

pub trait ResolutionReader {
    /// `X×Y dpi`, `X dpi` o `-` cuando no hay datos.
    fn resolution(&self, data: &[u8]) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ExifResolution;

impl ResolutionReader for ExifResolution {
    fn resolution(&self, data: &[u8]) -> String {
        let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
            Ok(exif) => exif,
            Err(err) => {
                tracing::debug!(error = %err, "no readable EXIF block");
                return NO_RESOLUTION.to_string();
            }
        };

        describe(&exif).unwrap_or_else(|| NO_RESOLUTION.to_string())
    }
}

fn describe(exif: &Exif) -> Option<String> {
    let x = exif.get_field(Tag::XResolution, In::PRIMARY);
    let y = exif.get_field(Tag::YResolution, In::PRIMARY);

    match (x, y) {
        (Some(x), Some(y)) => Some(format!("{}×{} dpi", numeric(x), numeric(y))),
        (Some(x), None) => Some(format!("{} dpi", numeric(x))),
        // Algunos archivos solo la declaran en la miniatura.
        _ => exif
            .fields()
            .find(|field| field.tag == Tag::XResolution)
            .map(|field| format!("{} dpi", numeric(field))),
    }
}

fn numeric(field: &Field) -> String {
    match &field.value {
        Value::Rational(values) if !values.is_empty() && values[0].denom != 0 => {
            values[0].to_f64().to_string()
        }
        _ => field.display_value().to_string(),
    }
}
