//! Firma PNG y cabecera IHDR.
//!
//! Los chunks se recorren por su longitud declarada (`longitud + 12` bytes por
//! chunk), de modo que los bytes `IHDR` dentro de datos comprimidos nunca se
//! confunden con la cabecera real.

use super::labels::{
    BIT_DEPTH, COLOR_TYPE, COMPRESSION, FILTER, INTERLACE, PNG_SIGNATURE, SIZE, TRANSPARENCY,
};
use super::put;
use super::reader::{has_bytes, read_u32, read_u8};
use crate::formatting::yes_no;
use crate::metadata::DiagnosticMap;

pub const SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

const IHDR: &[u8; 4] = b"IHDR";
const IHDR_LENGTH: u32 = 13;
/// Longitud, tipo y CRC que rodean el contenido de cada chunk.
const CHUNK_OVERHEAD: usize = 12;
const UNKNOWN: &str = "Unknown";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub compression: u8,
    pub filter: u8,
    pub interlace: u8,
}

impl ImageHeader {
    pub fn has_transparency(&self) -> bool {
        matches!(self.color_type, 4 | 6)
    }
}

pub fn analyze(data: &[u8]) -> DiagnosticMap {
    let mut info = DiagnosticMap::new();
    if data.len() <= SIGNATURE.len() {
        return info;
    }

    let valid = data[..SIGNATURE.len()] == SIGNATURE;
    put(
        &mut info,
        PNG_SIGNATURE,
        if valid { "Valid" } else { "Invalid" },
    );
    if !valid {
        return info;
    }

    if let Some(header) = find_header(data) {
        put(&mut info, COLOR_TYPE, color_type_label(header.color_type));
        put(&mut info, BIT_DEPTH, format!("{} bit", header.bit_depth));
        put(
            &mut info,
            SIZE,
            format!("{} × {} px", header.width, header.height),
        );
        put(&mut info, COMPRESSION, compression_label(header.compression));
        put(&mut info, FILTER, filter_label(header.filter));
        put(&mut info, INTERLACE, interlace_label(header.interlace));
        put(&mut info, TRANSPARENCY, yes_no(header.has_transparency()));
    }

    info
}

/// Primer chunk IHDR con longitud 13 y contenido completo.
pub fn find_header(data: &[u8]) -> Option<ImageHeader> {
    let mut pos = SIGNATURE.len();

    while has_bytes(data, pos, 8) {
        let length = read_u32(data, pos, false);
        let body = pos + 8;

        if &data[pos + 4..pos + 8] == IHDR && length == IHDR_LENGTH {
            if !has_bytes(data, body, IHDR_LENGTH as usize) {
                return None;
            }
            return Some(ImageHeader {
                width: read_u32(data, body, false),
                height: read_u32(data, body + 4, false),
                bit_depth: read_u8(data, body + 8),
                color_type: read_u8(data, body + 9),
                compression: read_u8(data, body + 10),
                filter: read_u8(data, body + 11),
                interlace: read_u8(data, body + 12),
            });
        }

        pos = pos
            .checked_add(length as usize)?
            .checked_add(CHUNK_OVERHEAD)?;
    }

    None
}

fn color_type_label(color_type: u8) -> &'static str {
    match color_type {
        0 => "Grayscale",
        2 => "Truecolor (RGB)",
        3 => "Indexed",
        4 => "Grayscale with alpha",
        6 => "Truecolor with alpha (RGBA)",
        _ => UNKNOWN,
    }
}

fn compression_label(method: u8) -> &'static str {
    if method == 0 { "Deflate" } else { UNKNOWN }
}

fn filter_label(method: u8) -> &'static str {
    if method == 0 { "Adaptive" } else { UNKNOWN }
}

fn interlace_label(method: u8) -> &'static str {
    match method {
        0 => "None",
        1 => "Adam7",
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut out = (payload.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(payload);
        out.extend_from_slice(&[0, 0, 0, 0]);
        out
    }

    fn ihdr(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
        let mut payload = width.to_be_bytes().to_vec();
        payload.extend_from_slice(&height.to_be_bytes());
        payload.extend_from_slice(&[bit_depth, color_type, 0, 0, interlace]);
        chunk(IHDR, &payload)
    }

    fn field<'a>(info: &'a DiagnosticMap, label: &str) -> Option<&'a str> {
        info.get(label).map(String::as_str)
    }

    #[test]
    fn decodes_minimal_truecolor_header() {
        let mut data = SIGNATURE.to_vec();
        data.extend(ihdr(100, 50, 8, 2, 0));

        let info = analyze(&data);
        assert_eq!(field(&info, PNG_SIGNATURE), Some("Valid"));
        assert_eq!(field(&info, COLOR_TYPE), Some("Truecolor (RGB)"));
        assert_eq!(field(&info, BIT_DEPTH), Some("8 bit"));
        assert_eq!(field(&info, SIZE), Some("100 × 50 px"));
        assert_eq!(field(&info, COMPRESSION), Some("Deflate"));
        assert_eq!(field(&info, FILTER), Some("Adaptive"));
        assert_eq!(field(&info, INTERLACE), Some("None"));
        assert_eq!(field(&info, TRANSPARENCY), Some("No"));
    }

    #[test]
    fn alpha_color_types_report_transparency() {
        for (color_type, label) in [(4, "Grayscale with alpha"), (6, "Truecolor with alpha (RGBA)")] {
            let mut data = SIGNATURE.to_vec();
            data.extend(ihdr(1, 1, 16, color_type, 1));

            let info = analyze(&data);
            assert_eq!(field(&info, COLOR_TYPE), Some(label));
            assert_eq!(field(&info, TRANSPARENCY), Some("Yes"));
            assert_eq!(field(&info, INTERLACE), Some("Adam7"));
            assert_eq!(field(&info, BIT_DEPTH), Some("16 bit"));
        }
    }

    #[test]
    fn skips_chunks_until_the_header() {
        let mut data = SIGNATURE.to_vec();
        // un chunk previo cuyo contenido imita una cabecera
        let mut decoy = 13_u32.to_be_bytes().to_vec();
        decoy.extend_from_slice(b"IHDR");
        decoy.extend_from_slice(&[0_u8; 13]);
        data.extend(chunk(b"tEXt", &decoy));
        data.extend(ihdr(7, 9, 8, 3, 0));

        let header = find_header(&data).expect("cabecera presente");
        assert_eq!((header.width, header.height), (7, 9));
        assert_eq!(field(&analyze(&data), COLOR_TYPE), Some("Indexed"));
    }

    #[test]
    fn header_with_wrong_length_is_ignored() {
        let mut data = SIGNATURE.to_vec();
        data.extend(chunk(IHDR, &[0_u8; 12]));

        let info = analyze(&data);
        assert_eq!(field(&info, PNG_SIGNATURE), Some("Valid"));
        assert!(!info.contains_key(SIZE));
    }

    #[test]
    fn truncated_header_contributes_signature_only() {
        let mut data = SIGNATURE.to_vec();
        data.extend(ihdr(100, 50, 8, 2, 0));
        data.truncate(SIGNATURE.len() + 12);

        let info = analyze(&data);
        assert_eq!(info.len(), 1);
    }

    #[test]
    fn invalid_signature_and_short_buffers() {
        let mut data = b"\x89PNG\r\n\x1b\n".to_vec();
        data.extend(ihdr(1, 1, 8, 0, 0));
        let info = analyze(&data);
        assert_eq!(field(&info, PNG_SIGNATURE), Some("Invalid"));
        assert_eq!(info.len(), 1);

        assert!(analyze(&SIGNATURE).is_empty());
        assert!(analyze(&[0x89, 0x50]).is_empty());
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        let mut data = SIGNATURE.to_vec();
        let mut payload = 1_u32.to_be_bytes().to_vec();
        payload.extend_from_slice(&1_u32.to_be_bytes());
        payload.extend_from_slice(&[8, 5, 1, 1, 2]);
        data.extend(chunk(IHDR, &payload));

        let info = analyze(&data);
        assert_eq!(field(&info, COLOR_TYPE), Some("Unknown"));
        assert_eq!(field(&info, COMPRESSION), Some("Unknown"));
        assert_eq!(field(&info, FILTER), Some("Unknown"));
        assert_eq!(field(&info, INTERLACE), Some("Unknown"));
    }
}
