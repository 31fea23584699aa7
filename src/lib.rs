//! RasterLens: metadata estructural de imágenes raster (JPEG, PNG, GIF, BMP,
//! TIFF y PCX) leída directamente de sus bytes, sin decodificar píxeles.

pub mod aggregator;
pub mod analyzers;
pub mod decoding;
pub mod error;
pub mod formatting;
pub mod metadata;
pub mod resolution;
pub mod sources;

pub use aggregator::{MetadataAggregator, analyze, analyze_all, analyze_all_parallel};
pub use analyzers::{ImageFormat, tiff_compression_only};
pub use error::{AnalysisError, ExportError, SourceError};
pub use metadata::{DiagnosticMap, Metadata};
pub use sources::{SourceFile, SourceOptions, collect_sources};
