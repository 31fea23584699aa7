//! Exportacion del lote de metadata en JSON, TXT o CSV.

use crate::error::ExportError;
use crate::formatting::format_timestamp;
use crate::metadata::report::Metadata;
use chrono::Local;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Columnas fijas del CSV, en el orden en que se escriben.
const CSV_HEADER: [&str; 8] = [
    "filename",
    "fileSize",
    "format",
    "dimensions",
    "resolution",
    "colorDepth",
    "compression",
    "additionalInfo",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Json => "JSON",
            ExportFormat::Txt => "TXT",
            ExportFormat::Csv => "CSV",
        }
    }
}

pub fn parse_export_format(input: &str) -> Result<ExportFormat, ExportError> {
    match input.to_lowercase().as_str() {
        "json" => Ok(ExportFormat::Json),
        "txt" | "text" => Ok(ExportFormat::Txt),
        "csv" => Ok(ExportFormat::Csv),
        _ => Err(ExportError::UnknownFormat(input.to_string())),
    }
}

pub fn export_report<W: Write>(
    records: &[Metadata],
    format: ExportFormat,
    writer: W,
) -> Result<(), ExportError> {
    match format {
        ExportFormat::Json => export_json(records, writer),
        ExportFormat::Txt => export_txt(records, writer),
        ExportFormat::Csv => export_csv(records, writer),
    }
}

pub fn export_report_to_path(
    records: &[Metadata],
    format: ExportFormat,
    path: &Path,
) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    export_report(records, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn export_json<W: Write>(records: &[Metadata], mut writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    Ok(())
}

fn export_txt<W: Write>(records: &[Metadata], mut writer: W) -> Result<(), ExportError> {
    writeln!(writer, "Image metadata report")?;
    writeln!(writer, "=====================")?;
    writeln!(writer, "Generated: {}", format_timestamp(Local::now()))?;
    writeln!(writer, "Files: {}", records.len())?;
    writeln!(writer)?;

    for record in records {
        writeln!(writer, "{}", record.filename)?;
        writeln!(writer, "{}", "-".repeat(record.filename.chars().count()))?;
        for (label, value) in fixed_fields(record) {
            if let Some(value) = value {
                writeln!(writer, "- {label}: {value}")?;
            }
        }

        match &record.additional_info {
            Some(info) if !info.is_empty() => {
                writeln!(writer, "Details:")?;
                for (key, value) in info {
                    writeln!(writer, "  - {key}: {value}")?;
                }
            }
            _ => {}
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn export_csv<W: Write>(records: &[Metadata], writer: W) -> Result<(), ExportError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADER)?;

    for record in records {
        let format = record
            .format
            .map(|format| format.label().to_string())
            .unwrap_or_default();
        csv.write_record([
            record.filename.as_str(),
            record.file_size.as_str(),
            format.as_str(),
            record.dimensions.as_deref().unwrap_or_default(),
            record.resolution.as_deref().unwrap_or_default(),
            record.color_depth.as_deref().unwrap_or_default(),
            record.compression.as_deref().unwrap_or_default(),
            flatten_info(record).as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Campos fijos con su etiqueta de reporte.
pub(crate) fn fixed_fields(record: &Metadata) -> [(&'static str, Option<String>); 6] {
    [
        ("File size", Some(record.file_size.clone())),
        ("Format", record.format.map(|format| format.label().to_string())),
        ("Dimensions", record.dimensions.clone()),
        ("Resolution", record.resolution.clone()),
        ("Color depth", record.color_depth.clone()),
        ("Compression", record.compression.clone()),
    ]
}

fn flatten_info(record: &Metadata) -> String {
    record
        .additional_info
        .iter()
        .flatten()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
