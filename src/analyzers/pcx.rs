//! Versión y codificación de archivos PCX.

use super::labels::{NOT_APPLICABLE, UNCOMPRESSED};
use super::reader::read_u8;

const VERSION_OFFSET: usize = 2;
const ENCODING_OFFSET: usize = 3;

/// Describe el archivo como `PCX <versión> (<codificación>)`.
pub fn compression(data: &[u8]) -> String {
    if data.len() < 4 {
        return NOT_APPLICABLE.to_string();
    }

    let version = version_label(read_u8(data, VERSION_OFFSET));
    let encoding = if read_u8(data, ENCODING_OFFSET) == 1 {
        "RLE"
    } else {
        UNCOMPRESSED
    };

    format!("PCX {version} ({encoding})")
}

fn version_label(code: u8) -> String {
    match code {
        0 => "2.5".to_string(),
        2 => "2.8 with palette".to_string(),
        3 => "2.8 without palette".to_string(),
        4 => "Paintbrush for Windows".to_string(),
        5 => "3.0+".to_string(),
        other => format!("unknown version: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_version_and_encoding() {
        assert_eq!(compression(&[0x0A, 0x05, 5, 1]), "PCX 3.0+ (RLE)");
        assert_eq!(
            compression(&[0x0A, 0x05, 2, 0, 8]),
            "PCX 2.8 with palette (uncompressed)"
        );
        assert_eq!(
            compression(&[0x0A, 0x00, 4, 1]),
            "PCX Paintbrush for Windows (RLE)"
        );
    }

    #[test]
    fn unknown_version_keeps_the_code() {
        assert_eq!(compression(&[0x0A, 0, 7, 1]), "PCX unknown version: 7 (RLE)");
    }

    #[test]
    fn truncated_header_is_not_applicable() {
        assert_eq!(compression(&[0x0A, 0x05, 5]), NOT_APPLICABLE);
    }
}
