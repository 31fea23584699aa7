//! Recorrido de segmentos de marcador JPEG.
//!
//! El recorrido empieza después de SOI y salta cada segmento según la longitud
//! big-endian que declara. Termina en SOS (lo que sigue son datos entrópicos),
//! en EOI, o cuando un segmento declara una longitud menor que 2.

use super::labels::{
    COLOR_SPACE, COMPONENTS, COMPRESSED_DATA, ENCODING, ERROR, FORMAT, HEIGHT, HUFFMAN_TABLES,
    JFIF_VERSION, METADATA, PRECISION, PRESENT, QUANTIZATION_TABLES, RESOLUTION_X,
    RESOLUTION_Y, RESTART_INTERVAL, WIDTH,
};
use super::put;
use super::reader::{has_bytes, read_u16, read_u8};
use crate::metadata::DiagnosticMap;
use tracing::debug;

const MARKER_PREFIX: u8 = 0xFF;
const SOI: [u8; 2] = [0xFF, 0xD8];

const APP0: u8 = 0xE0;
const APP1: u8 = 0xE1;
const SOF0: u8 = 0xC0;
const SOF2: u8 = 0xC2;
const DHT: u8 = 0xC4;
const DQT: u8 = 0xDB;
const DRI: u8 = 0xDD;
const SOS: u8 = 0xDA;
const EOI: u8 = 0xD9;

pub fn analyze(data: &[u8]) -> DiagnosticMap {
    let mut info = DiagnosticMap::new();

    if data.len() < 4 {
        put(&mut info, ERROR, "File too small for JPEG");
        return info;
    }
    if data[..2] != SOI {
        put(&mut info, ERROR, "Invalid JPEG signature");
        return info;
    }

    walk_segments(data, &mut info);
    info
}

fn walk_segments(data: &[u8], info: &mut DiagnosticMap) {
    let mut pos = 2;

    while pos + 1 < data.len() {
        if data[pos] != MARKER_PREFIX || data[pos + 1] == 0x00 {
            pos += 1;
            continue;
        }

        let marker = data[pos + 1];
        match marker {
            APP0 => read_jfif(data, pos, info),
            APP1 => read_exif_marker(data, pos, info),
            SOF0 => {
                put(info, ENCODING, "Baseline DCT (SOF0)");
                read_frame_header(data, pos, info);
            }
            SOF2 => {
                put(info, ENCODING, "Progressive DCT (SOF2)");
                read_frame_header(data, pos, info);
            }
            DQT => put(info, QUANTIZATION_TABLES, PRESENT),
            DHT => put(info, HUFFMAN_TABLES, PRESENT),
            DRI => read_restart_interval(data, pos, info),
            SOS => {
                let scan_start = pos + 2 + segment_length(data, pos);
                put(info, COMPRESSED_DATA, format!("Starts at offset {scan_start}"));
                return;
            }
            EOI => return,
            _ => {}
        }

        let length = segment_length(data, pos);
        if length < 2 {
            debug!(offset = pos, marker, "JPEG segment with invalid length");
            return;
        }
        pos += 2 + length;
    }
}

/// Longitud declarada del segmento en `pos` (incluye los dos bytes del campo).
fn segment_length(data: &[u8], pos: usize) -> usize {
    read_u16(data, pos + 2, false) as usize
}

fn read_jfif(data: &[u8], pos: usize, info: &mut DiagnosticMap) {
    if segment_length(data, pos) < 16 || !has_bytes(data, pos, 16) {
        return;
    }
    if &data[pos + 4..pos + 9] != b"JFIF\0" {
        return;
    }

    put(info, FORMAT, "JFIF");
    put(
        info,
        JFIF_VERSION,
        format!("{}.{}", data[pos + 9], data[pos + 10]),
    );

    let unit = match data[pos + 11] {
        1 => "dpi",
        2 => "dpcm",
        _ => return,
    };
    let x_density = read_u16(data, pos + 12, false);
    let y_density = read_u16(data, pos + 14, false);
    put(info, RESOLUTION_X, format!("{x_density} {unit}"));
    put(info, RESOLUTION_Y, format!("{y_density} {unit}"));
}

fn read_exif_marker(data: &[u8], pos: usize, info: &mut DiagnosticMap) {
    if segment_length(data, pos) < 8 || !has_bytes(data, pos, 9) {
        return;
    }
    if &data[pos + 4..pos + 9] == b"Exif\0" {
        put(info, METADATA, "EXIF present");
    }
}

fn read_frame_header(data: &[u8], pos: usize, info: &mut DiagnosticMap) {
    if segment_length(data, pos) < 8 || !has_bytes(data, pos, 10) {
        return;
    }

    let precision = read_u8(data, pos + 4);
    let height = read_u16(data, pos + 5, false);
    let width = read_u16(data, pos + 7, false);
    let components = read_u8(data, pos + 9);

    put(info, PRECISION, format!("{precision} bits/component"));
    put(info, WIDTH, format!("{width} px"));
    put(info, HEIGHT, format!("{height} px"));
    put(info, COMPONENTS, components.to_string());
    put(info, COLOR_SPACE, color_space(components));
}

fn read_restart_interval(data: &[u8], pos: usize, info: &mut DiagnosticMap) {
    if segment_length(data, pos) < 4 || !has_bytes(data, pos, 6) {
        return;
    }
    let interval = read_u16(data, pos + 4, false);
    put(info, RESTART_INTERVAL, format!("{interval} MCU blocks"));
}

fn color_space(components: u8) -> &'static str {
    match components {
        1 => "Grayscale",
        3 => "YCbCr",
        4 => "CMYK",
        _ => "Unknown",
    }
}
