//! Extraction error types.

use thiserror::Error;

/// Errors that can occur during content extraction.
///
/// A malformed file or codec failure lands here with a human-readable
/// cause; unsupported extensions are not errors (see
/// [`PipelineOutcome::Unsupported`](crate::PipelineOutcome)).
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Extraction process failed.
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// PDF-specific extraction error.
    #[cfg(feature = "pdf")]
    #[error("PDF extraction error: {0}")]
    Pdf(String),

    /// CSV-specific parsing error.
    #[cfg(feature = "tabular")]
    #[error("CSV extraction error: {0}")]
    Csv(String),

    /// Image decoding or OCR error.
    #[cfg(feature = "ocr")]
    #[error("Image extraction error: {0}")]
    Image(String),

    /// Video decoding error.
    #[cfg(feature = "video")]
    #[error("Video extraction error: {0}")]
    Video(String),

    /// IO error during extraction.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task join error from spawn_blocking.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;

impl From<ExtractError> for mesa_core::MesaError {
    fn from(err: ExtractError) -> Self {
        mesa_core::MesaError::Extraction(err.to_string())
    }
}
