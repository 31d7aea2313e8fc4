//! PDF content extraction using pdf-extract.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{Extracted, ExtractedText, Modality};
use crate::Extractor;

/// PDF text extractor.
///
/// Concatenates the text of every page into one string; pages yielding no
/// text contribute nothing. The synchronous pdf-extract call runs in
/// spawn_blocking to avoid stalling the async runtime.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Extractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<Extracted> {
        let bytes = tokio::fs::read(path).await?;
        let text = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
        })
        .await??;

        Ok(Extracted::Text(
            ExtractedText::new(text, Modality::Pdf, path)
                .with_metadata("extraction_method", "pdf-extract"),
        ))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf-extract"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_supports_pdf_case_insensitively() {
        let extractor = PdfExtractor::new();
        assert!(extractor.supports("pdf"));
        assert!(extractor.supports("PDF"));
        assert!(!extractor.supports("csv"));
    }

    #[tokio::test]
    async fn test_malformed_pdf_is_an_error_not_a_panic() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"this is not a pdf").unwrap();

        let result = PdfExtractor::new().extract(file.path()).await;
        assert!(matches!(result, Err(ExtractError::Pdf(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let result = PdfExtractor::new()
            .extract(Path::new("no/such/file.pdf"))
            .await;
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }
}
