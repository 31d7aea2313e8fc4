//! Extraction pipeline dispatching files to extractors by extension.

use std::path::Path;
use std::sync::Arc;

use crate::error::ExtractResult;
use crate::types::Extracted;
use crate::Extractor;

/// Outcome of routing a file through the pipeline.
///
/// An extension nothing claims is a valid terminal outcome, distinct from
/// an extraction failure.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// A registered extractor handled the file.
    Extracted(Extracted),
    /// No registered extractor claims this extension.
    Unsupported {
        /// The lowercased extension (empty for extension-less paths).
        extension: String,
    },
}

/// Pipeline routing files to the appropriate extractor by extension.
pub struct ExtractionPipeline {
    extractors: Vec<Arc<dyn Extractor>>,
}

impl ExtractionPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Create a pipeline with all available extractors.
    pub fn with_defaults() -> Self {
        Self {
            extractors: crate::ExtractorFactory::all(),
        }
    }

    /// Add an extractor to the pipeline.
    pub fn add_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractors.push(extractor);
        self
    }

    /// Extract content from the file at `path`, dispatching on its
    /// lowercased extension.
    pub async fn extract_path(&self, path: &Path) -> ExtractResult<PipelineOutcome> {
        let extension = Self::extension_of(path);
        for extractor in &self.extractors {
            if extractor.supports(&extension) {
                let extracted = extractor.extract(path).await?;
                return Ok(PipelineOutcome::Extracted(extracted));
            }
        }

        Ok(PipelineOutcome::Unsupported { extension })
    }

    /// Check if the pipeline can handle a given extension.
    pub fn supports(&self, extension: &str) -> bool {
        self.extractors.iter().any(|e| e.supports(extension))
    }

    /// List all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        self.extractors
            .iter()
            .flat_map(|e| e.supported_extensions().iter().copied())
            .collect()
    }

    /// Get the number of registered extractors.
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// Check if the pipeline has no registered extractors.
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    fn extension_of(path: &Path) -> String {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

impl Default for ExtractionPipeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
