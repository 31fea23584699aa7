//! Tipo de compresión declarado en la cabecera BITMAPINFOHEADER.

use super::labels::{NOT_APPLICABLE, UNCOMPRESSED};
use super::reader::{has_bytes, read_u32};

const COMPRESSION_OFFSET: usize = 30;

pub fn compression(data: &[u8]) -> String {
    if !has_bytes(data, COMPRESSION_OFFSET, 4) {
        return NOT_APPLICABLE.to_string();
    }

    let label = match read_u32(data, COMPRESSION_OFFSET, true) {
        0 => UNCOMPRESSED,
        1 => "RLE-8",
        2 => "RLE-4",
        3 => "bitmask",
        4 => "JPEG",
        5 => "PNG",
        _ => NOT_APPLICABLE,
    };
    label.to_string()
}
