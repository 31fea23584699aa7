//! Etiquetas estables del mapa de diagnóstico.
//!
//! Los consumidores dependen de estos textos literales; no se traducen ni se
//! renombran sin versionar el formato de salida.

pub const ERROR: &str = "Error";
pub const MIME_TYPE: &str = "MIME Type";

pub const WIDTH: &str = "Width";
pub const HEIGHT: &str = "Height";
pub const COMPRESSION: &str = "Compression";
pub const COLOR_SPACE: &str = "Color space";
pub const RESOLUTION_X: &str = "Resolution X";
pub const RESOLUTION_Y: &str = "Resolution Y";

// GIF
pub const GIF_VERSION: &str = "GIF version";
pub const GLOBAL_PALETTE: &str = "Global palette";
pub const PALETTE_COLORS: &str = "Palette colors";
pub const COLOR_RESOLUTION: &str = "Color resolution";
pub const PALETTE_SORTED: &str = "Palette sorted";
pub const ANIMATION: &str = "Animation";

// JPEG
pub const FORMAT: &str = "Format";
pub const JFIF_VERSION: &str = "JFIF version";
pub const METADATA: &str = "Metadata";
pub const ENCODING: &str = "Encoding";
pub const PRECISION: &str = "Precision";
pub const COMPONENTS: &str = "Components";
pub const QUANTIZATION_TABLES: &str = "Quantization tables";
pub const HUFFMAN_TABLES: &str = "Huffman tables";
pub const RESTART_INTERVAL: &str = "Restart interval";
pub const COMPRESSED_DATA: &str = "Compressed data";

// PNG
pub const PNG_SIGNATURE: &str = "PNG signature";
pub const COLOR_TYPE: &str = "Color type";
pub const BIT_DEPTH: &str = "Bit depth";
pub const SIZE: &str = "Size";
pub const FILTER: &str = "Filter";
pub const INTERLACE: &str = "Interlace";
pub const TRANSPARENCY: &str = "Transparency";

// TIFF
pub const BYTE_ORDER: &str = "Byte order";
pub const COLOR_DEPTH: &str = "Color depth";
pub const PLANAR_CONFIGURATION: &str = "Planar configuration";
pub const RESOLUTION_UNIT: &str = "Resolution unit";
pub const IFD_ERROR: &str = "IFD error";

/// Valor para enumeraciones que no pueden determinarse.
pub const NOT_APPLICABLE: &str = "not applicable";
pub const UNCOMPRESSED: &str = "uncompressed";
/// Resolución desconocida.
pub const NO_RESOLUTION: &str = "-";
pub const INVALID_FILE_FORMAT: &str = "Invalid file format";
pub const PRESENT: &str = "Present";
