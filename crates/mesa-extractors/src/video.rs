//! Video content extraction via sampled-frame OCR.
//!
//! Decodes with OpenCV, samples at most [`MAX_SAMPLED_FRAMES`] evenly
//! spaced frames, and OCRs each readable one. Requires an OpenCV install on
//! the host; the feature is off by default for that reason.

use std::path::Path;

use async_trait::async_trait;
use opencv::core::{Mat, Vector};
use opencv::prelude::*;
use opencv::{imgcodecs, videoio};

use crate::error::{ExtractError, ExtractResult};
use crate::image::ocr_dynamic_image;
use crate::types::{Extracted, ExtractedText, Modality};
use crate::Extractor;

/// Upper bound on frames sampled per video, regardless of its length.
pub const MAX_SAMPLED_FRAMES: i64 = 10;

/// Sampled-frame video OCR extractor.
///
/// Frames that fail to decode or OCR are skipped; a video where nothing is
/// readable yields empty text, which is a valid outcome.
#[derive(Debug, Clone, Default)]
pub struct VideoExtractor;

impl VideoExtractor {
    /// Create a new video extractor.
    pub fn new() -> Self {
        Self
    }

    fn sample_and_ocr(path: &str) -> Result<(String, usize), ExtractError> {
        let mut capture = videoio::VideoCapture::from_file(path, videoio::CAP_ANY)
            .map_err(|e| ExtractError::Video(e.to_string()))?;

        let total = capture
            .get(videoio::CAP_PROP_FRAME_COUNT)
            .map_err(|e| ExtractError::Video(e.to_string()))? as i64;
        let stride = (total / MAX_SAMPLED_FRAMES).max(1);

        let mut text = String::new();
        let mut sampled = 0usize;
        let mut frame = Mat::default();

        for index in (0..total.max(0))
            .step_by(stride as usize)
            .take(MAX_SAMPLED_FRAMES as usize)
        {
            capture
                .set(videoio::CAP_PROP_POS_FRAMES, index as f64)
                .map_err(|e| ExtractError::Video(e.to_string()))?;
            let read = capture
                .read(&mut frame)
                .map_err(|e| ExtractError::Video(e.to_string()))?;
            if !read || frame.empty() {
                continue;
            }
            sampled += 1;

            let mut encoded = Vector::<u8>::new();
            let ok = imgcodecs::imencode(".png", &frame, &mut encoded, &Vector::<i32>::new())
                .map_err(|e| ExtractError::Video(e.to_string()))?;
            if !ok {
                continue;
            }
            if let Ok(img) = image::load_from_memory(encoded.as_slice()) {
                if let Ok(frame_text) = ocr_dynamic_image(&img) {
                    text.push_str(&frame_text);
                }
            }
        }

        capture
            .release()
            .map_err(|e| ExtractError::Video(e.to_string()))?;

        Ok((text, sampled))
    }
}

#[async_trait]
impl Extractor for VideoExtractor {
    async fn extract(&self, path: &Path) -> ExtractResult<Extracted> {
        let path_str = path.to_string_lossy().into_owned();
        let (text, sampled) =
            tokio::task::spawn_blocking(move || Self::sample_and_ocr(&path_str)).await??;

        Ok(Extracted::Text(
            ExtractedText::new(text, Modality::Video, path)
                .with_metadata("extraction_method", "video-ocr")
                .with_metadata("frames_sampled", sampled),
        ))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["mp4", "avi"]
    }

    fn name(&self) -> &str {
        "video-ocr"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        let extractor = VideoExtractor::new();
        assert!(extractor.supports("mp4"));
        assert!(extractor.supports("AVI"));
        assert!(!extractor.supports("mkv"));
    }

    #[test]
    fn test_stride_never_exceeds_frame_cap() {
        // 25 frames, stride 2: naive stepping would visit 13 positions
        let total: i64 = 25;
        let stride = (total / MAX_SAMPLED_FRAMES).max(1);
        let visited = (0..total)
            .step_by(stride as usize)
            .take(MAX_SAMPLED_FRAMES as usize)
            .count();
        assert!(visited as i64 <= MAX_SAMPLED_FRAMES);
    }

    #[test]
    fn test_short_video_uses_unit_stride() {
        let total: i64 = 4;
        let stride = (total / MAX_SAMPLED_FRAMES).max(1);
        assert_eq!(stride, 1);
        let visited = (0..total)
            .step_by(stride as usize)
            .take(MAX_SAMPLED_FRAMES as usize)
            .count();
        assert_eq!(visited, 4);
    }
}
