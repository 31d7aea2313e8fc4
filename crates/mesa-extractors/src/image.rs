//! Image content extraction via OCR.
//!
//! Runs Tesseract over the whole image. Requires a tesseract install on the
//! host; the feature is off by default for that reason.

use std::path::Path;

use async_trait::async_trait;

use crate::error::{ExtractError, ExtractResult};
use crate::types::{Extracted, ExtractedText, Modality};
use crate::Extractor;

/// Whole-image OCR extractor.
#[derive(Debug, Clone, Default)]
pub struct ImageExtractor;

impl ImageExtractor {
    /// Create a new image extractor.
    pub fn new() -> Self {
        Self
    }
}

/// Run Tesseract over a decoded image.
///
/// Converts to the grayscale format Tesseract expects. Shared with the
/// video extractor, which feeds it sampled frames.
pub(crate) fn ocr_dynamic_image(img: &image::DynamicImage) -> Result<String, ExtractError> {
    let gray = image::DynamicImage::ImageLuma8(img.to_luma8());
    let tesseract_image = rusty_tesseract::Image::from_dynamic_image(&gray)
        .map_err(|e| ExtractError::Image(e.to_string()))?;

    let args = rusty_tesseract::Args::default();
    rusty_tesseract::image_to_string(&tesseract_image, &args)
        .map_err(|e| ExtractError::Image(e.to_string()))
}

#[async_trait]
impl Extractor for ImageExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<Extracted> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let bytes = tokio::fs::read(path).await?;
        let text = tokio::task::spawn_blocking(move || -> Result<String, ExtractError> {
            let img =
                image::load_from_memory(&bytes).map_err(|e| ExtractError::Image(e.to_string()))?;
            ocr_dynamic_image(&img)
        })
        .await??;

        Ok(Extracted::Text(
            ExtractedText::new(text, Modality::Image { format }, path)
                .with_metadata("extraction_method", "ocr"),
        ))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["jpg", "jpeg", "png"]
    }

    fn name(&self) -> &str {
        "image-ocr"
    }
}
