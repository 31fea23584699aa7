//! Tipo MIME declarado para cada entrada.

use crate::analyzers::ImageFormat;

/// Intenta detectar el tipo MIME a partir del contenido.
pub fn sniff_mime_type(data: &[u8]) -> Option<String> {
    infer::get(data).map(|kind| kind.mime_type().to_string())
}

/// Tipo MIME para un archivo: primero la extensión, luego el contenido y por
/// último `application/octet-stream`.
pub fn declared_mime_type(name: &str, data: &[u8]) -> String {
    let format = ImageFormat::from_filename(Some(name));
    if format.is_known() {
        return format.mime_type().to_string();
    }
    sniff_mime_type(data).unwrap_or_else(|| ImageFormat::Unknown.mime_type().to_string())
}
