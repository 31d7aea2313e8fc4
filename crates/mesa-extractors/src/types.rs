//! Core types for content extraction.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use mesa_core::RecordSet;
use serde::{Deserialize, Serialize};

/// Modality of the source file, determining the extraction strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// PDF document.
    Pdf,
    /// Tabular file (CSV).
    Tabular,
    /// Image with specified format.
    Image {
        /// Image format (e.g. "png", "jpeg").
        format: String,
    },
    /// Video file.
    Video,
}

/// What an extractor produced: unstructured text or structured records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Extracted {
    /// Raw text (PDF, image OCR, video OCR).
    Text(ExtractedText),
    /// Structured records (tabular input), persisted without classification.
    Records(RecordSet),
}

/// Extracted text with provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedText {
    /// The extracted text.
    pub text: String,

    /// Source file modality.
    pub modality: Modality,

    /// Path the text was extracted from.
    pub source: PathBuf,

    /// Additional metadata (format-specific).
    #[serde(skip_serializing_if = "HashMap::is_empty", default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ExtractedText {
    /// Create new extracted text.
    pub fn new(text: String, modality: Modality, source: impl AsRef<Path>) -> Self {
        Self {
            text,
            modality,
            source: source.as_ref().to_path_buf(),
            metadata: HashMap::new(),
        }
    }

    /// Add a metadata entry.
    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Check if extraction produced meaningful content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Get content length.
    pub fn len(&self) -> usize {
        self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_text_builder() {
        let text = ExtractedText::new("hola".to_string(), Modality::Pdf, "docs/report.pdf")
            .with_metadata("extraction_method", "pdf-extract");

        assert_eq!(text.len(), 4);
        assert!(!text.is_empty());
        assert_eq!(
            text.metadata.get("extraction_method"),
            Some(&serde_json::json!("pdf-extract"))
        );
    }

    #[test]
    fn test_empty_text_is_valid() {
        let text = ExtractedText::new("   ".to_string(), Modality::Video, "clip.mp4");
        assert!(text.is_empty());
    }
}
