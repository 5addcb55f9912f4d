// src/types/request.rs
use std::path::Path;

use anyhow::{Context, Result};

use crate::utils::content_type_for;

/// A file chosen by the user, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    /// Read a document from disk, keeping only its final path segment as name
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();

        Ok(Self::new(file_name, bytes))
    }
}

/// Everything that goes into one `POST /analyze`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub resume: DocumentUpload,
    pub jd: DocumentUpload,
    pub use_hf: bool,
    pub model: Option<String>,
}

impl AnalysisRequest {
    /// Text fields of the multipart body, in the order they are sent.
    /// `model` only appears when generation is requested.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("use_hf", self.use_hf.to_string())];
        if self.use_hf {
            if let Some(model) = &self.model {
                fields.push(("model", model.clone()));
            }
        }
        fields
    }
}
