//! Modelo de salida: un registro de metadata por archivo analizado.

use crate::analyzers::ImageFormat;
use crate::analyzers::labels::{ERROR, INVALID_FILE_FORMAT, MIME_TYPE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Campos etiquetados específicos del formato. Las claves son únicas por
/// ejecución de un analizador.
pub type DiagnosticMap = BTreeMap<String, String>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub filename: String,
    pub file_size: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<DiagnosticMap>,
}

impl Metadata {
    pub fn new(filename: impl Into<String>, file_size: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            file_size: file_size.into(),
            ..Self::default()
        }
    }

    /// Registro parcial para archivos que el decodificador genérico no pudo leer.
    pub fn invalid(
        filename: impl Into<String>,
        file_size: impl Into<String>,
        mime_type: &str,
    ) -> Self {
        let mut info = DiagnosticMap::new();
        info.insert(ERROR.to_string(), INVALID_FILE_FORMAT.to_string());
        info.insert(MIME_TYPE.to_string(), mime_type.to_string());

        Self {
            additional_info: Some(info),
            ..Self::new(filename, file_size)
        }
    }

    pub fn diagnostic(&self, label: &str) -> Option<&str> {
        self.additional_info
            .as_ref()
            .and_then(|info| info.get(label))
            .map(String::as_str)
    }

    pub fn is_failure(&self) -> bool {
        self.diagnostic(ERROR).is_some()
    }
}
