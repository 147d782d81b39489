//! Training and recognition options

use crate::error::{RecogError, RecogResult};
use casocr_region::SegmentOptions;

/// Blobs with at most this many pixels are treated as noise
pub const DEFAULT_NOISE_FLOOR: usize = 15;

/// Number of characters in a captcha
pub const DEFAULT_GLYPH_COUNT: usize = 4;

/// Options shared by training and recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecogOptions {
    /// Segmentation options
    pub segment: SegmentOptions,
    /// Maximum size of a blob discarded as noise
    pub noise_floor: usize,
    /// Number of glyphs expected per image
    pub glyph_count: usize,
}

impl Default for RecogOptions {
    fn default() -> Self {
        Self {
            segment: SegmentOptions::default(),
            noise_floor: DEFAULT_NOISE_FLOOR,
            glyph_count: DEFAULT_GLYPH_COUNT,
        }
    }
}

impl RecogOptions {
    /// Set the segmentation options
    pub fn with_segment(mut self, segment: SegmentOptions) -> Self {
        self.segment = segment;
        self
    }

    /// Set the noise floor
    pub fn with_noise_floor(mut self, noise_floor: usize) -> Self {
        self.noise_floor = noise_floor;
        self
    }

    /// Set the expected glyph count
    pub fn with_glyph_count(mut self, glyph_count: usize) -> Self {
        self.glyph_count = glyph_count;
        self
    }

    /// Validate options
    pub fn validate(&self) -> RecogResult<()> {
        if self.glyph_count == 0 {
            return Err(RecogError::InvalidParameter(
                "glyph_count must be positive".to_string(),
            ));
        }
        self.segment.validate()?;
        Ok(())
    }
}
