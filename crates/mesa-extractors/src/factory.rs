//! Factory for creating extractors.

use std::sync::Arc;

use crate::Extractor;

#[cfg(feature = "pdf")]
use crate::PdfExtractor;

#[cfg(feature = "tabular")]
use crate::CsvExtractor;

#[cfg(feature = "ocr")]
use crate::ImageExtractor;

#[cfg(feature = "video")]
use crate::VideoExtractor;

/// Factory for creating file extractors.
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create a PDF extractor.
    #[cfg(feature = "pdf")]
    pub fn pdf() -> Arc<dyn Extractor> {
        Arc::new(PdfExtractor::new())
    }

    /// Create a CSV extractor.
    #[cfg(feature = "tabular")]
    pub fn csv() -> Arc<dyn Extractor> {
        Arc::new(CsvExtractor::new())
    }

    /// Create an image OCR extractor.
    #[cfg(feature = "ocr")]
    pub fn image() -> Arc<dyn Extractor> {
        Arc::new(ImageExtractor::new())
    }

    /// Create a sampled-frame video extractor.
    #[cfg(feature = "video")]
    pub fn video() -> Arc<dyn Extractor> {
        Arc::new(VideoExtractor::new())
    }

    /// Create the extractor for a given file extension, if any claims it.
    ///
    /// Returns `None` for extensions no enabled extractor handles; callers
    /// treat that as the unsupported-format outcome, not an error.
    pub fn for_extension(extension: &str) -> Option<Arc<dyn Extractor>> {
        Self::all()
            .into_iter()
            .find(|extractor| extractor.supports(extension))
    }

    /// Get all available extractors.
    #[allow(clippy::vec_init_then_push)]
    pub fn all() -> Vec<Arc<dyn Extractor>> {
        let mut extractors: Vec<Arc<dyn Extractor>> = Vec::new();

        #[cfg(feature = "pdf")]
        extractors.push(Self::pdf());

        #[cfg(feature = "tabular")]
        extractors.push(Self::csv());

        #[cfg(feature = "ocr")]
        extractors.push(Self::image());

        #[cfg(feature = "video")]
        extractors.push(Self::video());

        extractors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_all_extractors() {
        let extractors = ExtractorFactory::all();

        #[cfg(all(feature = "pdf", feature = "tabular", not(feature = "ocr")))]
        assert_eq!(extractors.len(), 2);

        #[cfg(all(feature = "pdf", feature = "tabular", feature = "ocr", not(feature = "video")))]
        assert_eq!(extractors.len(), 3);

        #[cfg(all(feature = "pdf", feature = "tabular", feature = "ocr", feature = "video"))]
        assert_eq!(extractors.len(), 4);
    }

    #[cfg(feature = "tabular")]
    #[test]
    fn test_factory_for_extension_csv() {
        let extractor = ExtractorFactory::for_extension("csv").unwrap();
        assert_eq!(extractor.name(), "csv");
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn test_factory_for_extension_is_case_insensitive() {
        assert!(ExtractorFactory::for_extension("PDF").is_some());
    }

    #[test]
    fn test_factory_for_unknown_extension() {
        assert!(ExtractorFactory::for_extension("docx").is_none());
    }
}
