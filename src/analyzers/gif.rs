//! Paleta global y animación en archivos GIF.

use super::labels::{
    ANIMATION, COLOR_RESOLUTION, GIF_VERSION, GLOBAL_PALETTE, PALETTE_COLORS, PALETTE_SORTED,
};
use super::put;
use crate::formatting::yes_no;
use crate::metadata::DiagnosticMap;

const HEADER_LEN: usize = 13;
const PACKED_OFFSET: usize = 10;
const GRAPHIC_CONTROL_EXTENSION: [u8; 2] = [0x21, 0xF9];

pub fn analyze(data: &[u8]) -> DiagnosticMap {
    let mut info = DiagnosticMap::new();
    if data.len() <= HEADER_LEN {
        return info;
    }

    let signature = &data[..6];
    if signature == b"GIF89a" || signature == b"GIF87a" {
        put(&mut info, GIF_VERSION, String::from_utf8_lossy(signature));
    }

    let packed = data[PACKED_OFFSET];
    let has_global_table = packed & 0x80 != 0;
    let color_resolution = ((packed & 0x70) >> 4) + 1;
    let sorted = packed & 0x08 != 0;
    let table_size = 2_u32 << (packed & 0x07);

    put(&mut info, GLOBAL_PALETTE, yes_no(has_global_table));
    if has_global_table {
        put(&mut info, PALETTE_COLORS, table_size.to_string());
        put(
            &mut info,
            COLOR_RESOLUTION,
            format!("{color_resolution} bits/channel"),
        );
        put(&mut info, PALETTE_SORTED, yes_no(sorted));
    }

    put(&mut info, ANIMATION, yes_no(has_graphic_control(data)));

    info
}

/// Busca el introductor de la extensión de control gráfico en todo el búfer.
fn has_graphic_control(data: &[u8]) -> bool {
    data.windows(2)
        .any(|pair| pair == GRAPHIC_CONTROL_EXTENSION)
}
