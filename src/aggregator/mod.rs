//! Orquestación por archivo: clasificar, decodificar, despachar al analizador
//! del formato y adjuntar la resolución genérica.

use crate::analyzers::ImageFormat;
use crate::decoding::{ImageCrateDecoder, PixelDecoder};
use crate::error::AnalysisError;
use crate::formatting::format_size;
use crate::metadata::Metadata;
use crate::resolution::{ExifResolution, ResolutionReader};
use crate::sources::SourceFile;
use rayon::prelude::*;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};


/// Produce un [`Metadata`] por entrada. Los fallos de un archivo nunca
/// interrumpen el lote.
#[derive(Clone, Debug, Default)]
pub struct MetadataAggregator<D = ImageCrateDecoder, R = ExifResolution> {
    decoder: D,
    resolution: R,
}

impl<D: PixelDecoder, R: ResolutionReader> MetadataAggregator<D, R> {
    pub fn new(decoder: D, resolution: R) -> Self {
        Self {
            decoder,
            resolution,
        }
    }

    pub fn analyze(&self, data: &[u8], filename: &str, mime_type: &str) -> Metadata {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_analyze(data, filename)))
            .unwrap_or_else(|payload| Err(AnalysisError::Panicked(panic_message(payload))));

        match outcome {
            Ok(metadata) => metadata,
            Err(AnalysisError::Decode(err)) => {
                tracing::warn!(file = filename, error = %err, "image could not be decoded");
                Metadata::invalid(filename, format_size(data.len() as u64), mime_type)
            }
            Err(err) => {
                tracing::error!(file = filename, error = %err, "unexpected failure during analysis");
                Metadata::invalid(filename, format_size(data.len() as u64), mime_type)
            }
        }
    }

    /// Analiza un lote en orden; siempre devuelve un registro por entrada.
    pub fn analyze_all(&self, files: &[SourceFile]) -> Vec<Metadata> {
        files
            .iter()
            .map(|file| self.analyze(&file.data, &file.name, &file.mime_type))
            .collect()
    }

    fn try_analyze(&self, data: &[u8], filename: &str) -> Result<Metadata, AnalysisError> {
        let mut metadata = Metadata::new(filename, format_size(data.len() as u64));
        let format = ImageFormat::from_filename(Some(filename));

        let decoded = self.decoder.decode(data)?;
        metadata.format = Some(format);
        metadata.dimensions = Some(decoded.dimensions());
        metadata.color_depth = Some(decoded.color_depth());
        metadata.compression = format.compression(data);
        metadata.additional_info = format.diagnostics(data);
        metadata.resolution = Some(self.resolution.resolution(data));

        tracing::debug!(
            file = filename,
            format = %format,
            dimensions = metadata.dimensions.as_deref().unwrap_or_default(),
            "file analyzed"
        );
        Ok(metadata)
    }
}

impl<D, R> MetadataAggregator<D, R>
where
    D: PixelDecoder + Sync,
    R: ResolutionReader + Sync,
{
    /// Igual que [`MetadataAggregator::analyze_all`], repartiendo los archivos
    /// entre los hilos de `rayon`. El orden de salida es el de entrada.
    pub fn analyze_all_parallel(&self, files: &[SourceFile]) -> Vec<Metadata> {
        files
            .par_iter()
            .map(|file| self.analyze(&file.data, &file.name, &file.mime_type))
            .collect()
    }
}

pub fn analyze(data: &[u8], filename: &str, mime_type: &str) -> Metadata {
    MetadataAggregator::<ImageCrateDecoder, ExifResolution>::default()
        .analyze(data, filename, mime_type)
}

pub fn analyze_all(files: &[SourceFile]) -> Vec<Metadata> {
    MetadataAggregator::<ImageCrateDecoder, ExifResolution>::default().analyze_all(files)
}

pub fn analyze_all_parallel(files: &[SourceFile]) -> Vec<Metadata> {
    MetadataAggregator::<ImageCrateDecoder, ExifResolution>::default().analyze_all_parallel(files)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic without message".to_string()
    }
}
