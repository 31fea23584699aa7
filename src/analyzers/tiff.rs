//! Cabecera TIFF y recorrido del primer IFD.

use super::labels::{
    BYTE_ORDER, COLOR_DEPTH, COLOR_SPACE, COMPRESSION, ERROR, HEIGHT, IFD_ERROR, NOT_APPLICABLE,
    PLANAR_CONFIGURATION, RESOLUTION_UNIT, RESOLUTION_X, RESOLUTION_Y, UNCOMPRESSED, WIDTH,
};
use super::put;
use super::reader::{Endian, has_bytes};
use crate::metadata::DiagnosticMap;
use tracing::debug;

pub const TIFF_MAGIC: u16 = 42;
pub const HEADER_LEN: usize = 8;
pub const IFD_ENTRY_LEN: usize = 12;
/// Límite de entradas por IFD para descartar directorios corruptos.
pub const MAX_ENTRIES: u16 = 1000;

pub const TAG_IMAGE_WIDTH: u16 = 256;
pub const TAG_IMAGE_HEIGHT: u16 = 257;
pub const TAG_BITS_PER_SAMPLE: u16 = 258;
pub const TAG_COMPRESSION: u16 = 259;
pub const TAG_PHOTOMETRIC: u16 = 262;
pub const TAG_X_RESOLUTION: u16 = 282;
pub const TAG_Y_RESOLUTION: u16 = 283;
pub const TAG_PLANAR_CONFIGURATION: u16 = 284;
pub const TAG_RESOLUTION_UNIT: u16 = 296;

pub const TYPE_SHORT: u16 = 3;
pub const TYPE_LONG: u16 = 4;
pub const TYPE_RATIONAL: u16 = 5;

/// Entrada de directorio: etiqueta, tipo, cantidad y valor u offset.
#[derive(Clone, Copy, Debug)]
pub struct IfdEntry {
    pub tag: u16,
    pub field_type: u16,
    pub count: u32,
    pub value_offset: u32,
    /// Posición del campo valor dentro del archivo.
    value_pos: usize,
}

#[derive(Debug, Eq, PartialEq)]
pub enum HeaderError {
    TooSmall,
    Signature,
    Magic(u16),
    IfdOffset(u32),
}

impl HeaderError {
    fn message(&self) -> String {
        match self {
            HeaderError::TooSmall => "File too small for TIFF".to_string(),
            HeaderError::Signature => "Invalid TIFF signature".to_string(),
            HeaderError::Magic(value) => format!("Invalid TIFF magic number: {value}"),
            HeaderError::IfdOffset(offset) => format!("Invalid first IFD offset: {offset}"),
        }
    }
}

/// Valida firma, número mágico y offset del primer IFD.
pub fn read_header(data: &[u8]) -> Result<(Endian, usize), HeaderError> {
    if data.len() < HEADER_LEN {
        return Err(HeaderError::TooSmall);
    }
    let endian = byte_order(data).ok_or(HeaderError::Signature)?;

    let magic = endian.read_u16(data, 2);
    if magic != TIFF_MAGIC {
        return Err(HeaderError::Magic(magic));
    }

    let ifd_offset = endian.read_u32(data, 4);
    let ifd = ifd_offset as usize;
    if ifd < HEADER_LEN || ifd >= data.len() {
        return Err(HeaderError::IfdOffset(ifd_offset));
    }

    Ok((endian, ifd))
}

fn byte_order(data: &[u8]) -> Option<Endian> {
    match data.get(..2)? {
        b"II" => Some(Endian::Little),
        b"MM" => Some(Endian::Big),
        _ => None,
    }
}

fn byte_order_label(endian: Endian) -> &'static str {
    match endian {
        Endian::Little => "Little endian",
        Endian::Big => "Big endian",
    }
}

pub fn analyze(data: &[u8]) -> DiagnosticMap {
    let mut info = DiagnosticMap::new();

    let (endian, ifd) = match read_header(data) {
        Ok(header) => header,
        Err(error) => {
            debug!(?error, "TIFF header rejected");
            if let HeaderError::Magic(_) | HeaderError::IfdOffset(_) = error
                && let Some(endian) = byte_order(data)
            {
                put(&mut info, BYTE_ORDER, byte_order_label(endian));
            }
            put(&mut info, ERROR, error.message());
            return info;
        }
    };
    put(&mut info, BYTE_ORDER, byte_order_label(endian));

    let entries = match read_entries(data, endian, ifd) {
        Ok(entries) => entries,
        Err(count) => {
            put(&mut info, IFD_ERROR, format!("Invalid entry count: {count}"));
            return info;
        }
    };

    for entry in entries {
        describe_entry(data, endian, entry, &mut info);
    }

    info
}

/// Consulta independiente: solo la compresión declarada en el primer IFD.
pub fn compression_only(data: &[u8]) -> String {
    let Ok((endian, ifd)) = read_header(data) else {
        return NOT_APPLICABLE.to_string();
    };
    let Ok(entries) = read_entries(data, endian, ifd) else {
        return NOT_APPLICABLE.to_string();
    };

    entries
        .into_iter()
        .find(|entry| entry.tag == TAG_COMPRESSION)
        .map(|entry| compression_label(inline_short(data, endian, &entry)).to_string())
        .unwrap_or_else(|| UNCOMPRESSED.to_string())
}

/// Lee las entradas completas del IFD en `ifd`; `Err` con la cantidad si
/// excede [`MAX_ENTRIES`].
fn read_entries(data: &[u8], endian: Endian, ifd: usize) -> Result<Vec<IfdEntry>, u16> {
    let count = endian.read_u16(data, ifd);
    if count > MAX_ENTRIES {
        return Err(count);
    }

    let mut entries = Vec::with_capacity(count as usize);
    for index in 0..count as usize {
        let offset = ifd + 2 + index * IFD_ENTRY_LEN;
        if !has_bytes(data, offset, IFD_ENTRY_LEN) {
            debug!(index, count, "truncated IFD");
            break;
        }
        entries.push(IfdEntry {
            tag: endian.read_u16(data, offset),
            field_type: endian.read_u16(data, offset + 2),
            count: endian.read_u32(data, offset + 4),
            value_offset: endian.read_u32(data, offset + 8),
            value_pos: offset + 8,
        });
    }
    Ok(entries)
}

fn describe_entry(data: &[u8], endian: Endian, entry: IfdEntry, info: &mut DiagnosticMap) {
    match entry.tag {
        TAG_IMAGE_WIDTH => {
            if let Some(width) = dimension(data, endian, &entry) {
                put(info, WIDTH, format!("{width} px"));
            }
        }
        TAG_IMAGE_HEIGHT => {
            if let Some(height) = dimension(data, endian, &entry) {
                put(info, HEIGHT, format!("{height} px"));
            }
        }
        TAG_BITS_PER_SAMPLE => {
            if let Some(bits) = bits_per_sample(data, endian, &entry) {
                put(info, COLOR_DEPTH, bits);
            }
        }
        TAG_COMPRESSION => {
            put(
                info,
                COMPRESSION,
                compression_label(inline_short(data, endian, &entry)),
            );
        }
        TAG_PHOTOMETRIC => {
            put(
                info,
                COLOR_SPACE,
                photometric_label(inline_short(data, endian, &entry)),
            );
        }
        TAG_X_RESOLUTION | TAG_Y_RESOLUTION => {
            if let Some(value) = rational(data, endian, &entry) {
                let label = if entry.tag == TAG_X_RESOLUTION {
                    RESOLUTION_X
                } else {
                    RESOLUTION_Y
                };
                put(info, label, format!("{value:?} dpi"));
            }
        }
        TAG_PLANAR_CONFIGURATION => {
            let planar = if inline_short(data, endian, &entry) == 1 {
                "Chunky"
            } else {
                "Planar"
            };
            put(info, PLANAR_CONFIGURATION, planar);
        }
        TAG_RESOLUTION_UNIT => {
            put(
                info,
                RESOLUTION_UNIT,
                resolution_unit_label(inline_short(data, endian, &entry)),
            );
        }
        _ => {}
    }
}

/// Valor SHORT almacenado en línea: los dos primeros bytes del campo valor,
/// en el orden de bytes del archivo. Para LONG se usan los 16 bits bajos.
fn inline_short(data: &[u8], endian: Endian, entry: &IfdEntry) -> u32 {
    if entry.field_type == TYPE_LONG {
        entry.value_offset & 0xFFFF
    } else {
        endian.read_u16(data, entry.value_pos) as u32
    }
}

fn dimension(data: &[u8], endian: Endian, entry: &IfdEntry) -> Option<u32> {
    match (entry.field_type, entry.count) {
        (TYPE_SHORT, 1) => Some(endian.read_u16(data, entry.value_pos) as u32),
        (TYPE_LONG, 1) => Some(entry.value_offset),
        (TYPE_SHORT, _) => {
            let pos = entry.value_offset as usize;
            has_bytes(data, pos, 2).then(|| endian.read_u16(data, pos) as u32)
        }
        (TYPE_LONG, _) => {
            let pos = entry.value_offset as usize;
            has_bytes(data, pos, 4).then(|| endian.read_u32(data, pos))
        }
        _ => None,
    }
}

fn bits_per_sample(data: &[u8], endian: Endian, entry: &IfdEntry) -> Option<String> {
    match (entry.field_type, entry.count) {
        (TYPE_SHORT, 1) => Some(format!("{} bit", endian.read_u16(data, entry.value_pos))),
        (TYPE_SHORT, count) if count > 1 => {
            let start = entry.value_offset as usize;
            let count = count as usize;
            if !has_bytes(data, start, count.checked_mul(2)?) {
                return None;
            }
            let samples = (0..count)
                .map(|index| endian.read_u16(data, start + index * 2).to_string())
                .collect::<Vec<_>>();
            Some(format!("{} bit", samples.join("+")))
        }
        (TYPE_LONG, 1) => Some(format!("{} bit", entry.value_offset & 0xFFFF)),
        _ => None,
    }
}

fn rational(data: &[u8], endian: Endian, entry: &IfdEntry) -> Option<f64> {
    if entry.field_type != TYPE_RATIONAL || entry.count != 1 {
        return None;
    }
    let pos = entry.value_offset as usize;
    if !has_bytes(data, pos, 8) {
        return None;
    }
    let numerator = endian.read_u32(data, pos);
    let denominator = endian.read_u32(data, pos + 4);
    if denominator == 0 {
        return Some(0.0);
    }
    Some(numerator as f64 / denominator as f64)
}

fn compression_label(value: u32) -> &'static str {
    match value {
        1 => "None",
        2 => "CCITT RLE",
        3 => "CCITT G3",
        4 => "CCITT G4",
        5 => "LZW",
        6 | 7 => "JPEG",
        8 => "Deflate",
        9 => "JBIG",
        10 => "RLE",
        _ => NOT_APPLICABLE,
    }
}

fn photometric_label(value: u32) -> &'static str {
    match value {
        0 => "WhiteIsZero",
        1 => "BlackIsZero",
        2 => "RGB",
        3 => "RGB Palette",
        4 => "Transparency Mask",
        5 => "CMYK",
        6 => "YCbCr",
        8 => "CIELab",
        _ => NOT_APPLICABLE,
    }
}

fn resolution_unit_label(value: u32) -> String {
    match value {
        1 => "None".to_string(),
        2 => "Inch".to_string(),
        3 => "Centimeter".to_string(),
        other => format!("Unknown ({other})"),
    }
}
