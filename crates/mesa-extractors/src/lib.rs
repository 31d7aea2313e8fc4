//! mesa-extractors - File content extraction for data integration.
//!
//! Provides extractors for PDF, CSV, image, and video content with a
//! unified trait-based interface. Dispatch is by lowercased file extension;
//! an extension no extractor claims is reported as an explicit unsupported
//! outcome, never an error.
//!
//! # Features
//!
//! - `pdf` (default) - PDF text extraction via pdf-extract
//! - `tabular` (default) - CSV parsing into records via csv
//! - `ocr` - Image OCR via tesseract (requires tesseract installed)
//! - `video` - Sampled-frame video OCR via OpenCV (requires OpenCV installed)
//! - `full` - All extraction features
//!
//! # Example
//!
//! ```ignore
//! use mesa_extractors::{ExtractionPipeline, PipelineOutcome};
//!
//! let pipeline = ExtractionPipeline::with_defaults();
//! match pipeline.extract_path("reports/ventas.csv".as_ref()).await? {
//!     PipelineOutcome::Extracted(content) => { /* text or records */ }
//!     PipelineOutcome::Unsupported { extension } => { /* terminal, not an error */ }
//! }
//! ```

mod error;
mod factory;
mod pipeline;
mod types;

#[cfg(feature = "pdf")]
mod pdf;

#[cfg(feature = "tabular")]
mod tabular;

#[cfg(feature = "ocr")]
pub mod image;

#[cfg(feature = "video")]
mod video;

pub use error::{ExtractError, ExtractResult};
pub use factory::ExtractorFactory;
pub use pipeline::{ExtractionPipeline, PipelineOutcome};
pub use types::{Extracted, ExtractedText, Modality};

#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;

#[cfg(feature = "tabular")]
pub use tabular::CsvExtractor;

#[cfg(feature = "ocr")]
pub use image::ImageExtractor;

#[cfg(feature = "video")]
pub use video::VideoExtractor;

use async_trait::async_trait;
use std::path::Path;

/// Core Extractor trait - all file extractors implement this.
///
/// Extractors read the file themselves: some formats (video) cannot be
/// decoded from an in-memory buffer by the underlying library.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract content from the file at `path`.
    async fn extract(&self, path: &Path) -> ExtractResult<Extracted>;

    /// Lowercased file extensions (without the dot) this extractor handles.
    fn supported_extensions(&self) -> &[&str];

    /// Check if this extractor handles the given extension.
    fn supports(&self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        self.supported_extensions().contains(&extension.as_str())
    }

    /// Human-readable name for this extractor.
    fn name(&self) -> &str;
}
