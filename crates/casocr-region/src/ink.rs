//! Ink pixel classification
//!
//! Captcha strokes are drawn in a mid-intensity color, while the background
//! and the anti-OCR clutter sit at the extremes (near white or near black).
//! A pixel is ink when the energy of its color, `r² + g² + b²` computed on
//! 16-bit channels, lies strictly inside a band.

use crate::error::{RegionError, RegionResult};
use casocr_core::{Pix, color};

/// Default lower bound (exclusive) of the ink band
pub const DEFAULT_INK_LOWER: u64 = 80_000_000;

/// Default upper bound (exclusive) of the ink band
pub const DEFAULT_INK_UPPER: u64 = 5_000_000_000;

/// Expand an 8-bit channel to 16 bits (`0xAB` -> `0xABAB`).
#[inline]
fn widen(c: u8) -> u64 {
    u64::from(c) * 257
}

/// Sum of squared 16-bit channel values of a packed pixel.
///
/// Alpha is ignored.
#[inline]
pub fn channel_energy(pixel: u32) -> u64 {
    let (r, g, b) = color::extract_rgb(pixel);
    let (r, g, b) = (widen(r), widen(g), widen(b));
    r * r + g * g + b * b
}

/// Open interval of channel energies classified as ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkBand {
    /// Exclusive lower bound
    pub lower: u64,
    /// Exclusive upper bound
    pub upper: u64,
}

impl Default for InkBand {
    fn default() -> Self {
        Self {
            lower: DEFAULT_INK_LOWER,
            upper: DEFAULT_INK_UPPER,
        }
    }
}

impl InkBand {
    /// Create a band with explicit bounds.
    pub fn new(lower: u64, upper: u64) -> RegionResult<Self> {
        let band = Self { lower, upper };
        band.validate()?;
        Ok(band)
    }

    /// Check that at least one energy value can fall inside the band.
    pub fn validate(&self) -> RegionResult<()> {
        if self.upper <= self.lower.saturating_add(1) {
            return Err(RegionError::InvalidParameters(format!(
                "empty ink band: ({}, {})",
                self.lower, self.upper
            )));
        }
        Ok(())
    }

    /// Whether a packed pixel is ink.
    #[inline]
    pub fn is_ink(&self, pixel: u32) -> bool {
        let e = channel_energy(pixel);
        e > self.lower && e < self.upper
    }

    /// Row-major ink mask of an image.
    pub fn mask(&self, pix: &Pix) -> Vec<bool> {
        pix.data().iter().map(|&p| self.is_ink(p)).collect()
    }

    /// Number of ink pixels in an image.
    pub fn count(&self, pix: &Pix) -> usize {
        pix.data().iter().filter(|&&p| self.is_ink(p)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use casocr_core::color::{compose_rgb, compose_rgba};

    #[test]
    fn test_channel_energy() {
        assert_eq!(channel_energy(compose_rgb(0, 0, 0)), 0);
        assert_eq!(channel_energy(compose_rgb(255, 255, 255)), 3 * 65535 * 65535);
        assert_eq!(channel_energy(compose_rgb(1, 0, 0)), 257 * 257);
    }

    #[test]
    fn test_extremes_are_not_ink() {
        let band = InkBand::default();
        assert!(!band.is_ink(compose_rgb(0, 0, 0)));
        assert!(!band.is_ink(compose_rgb(255, 255, 255)));
        assert!(!band.is_ink(compose_rgb(230, 230, 230)));
    }

    #[test]
    fn test_stroke_colors_are_ink() {
        let band = InkBand::default();
        assert!(band.is_ink(compose_rgb(0, 0, 200)));
        assert!(band.is_ink(compose_rgb(100, 100, 100)));
        assert!(band.is_ink(compose_rgb(160, 40, 40)));
    }

    #[test]
    fn test_alpha_ignored() {
        let band = InkBand::default();
        assert_eq!(
            band.is_ink(compose_rgba(0, 0, 200, 0)),
            band.is_ink(compose_rgba(0, 0, 200, 255))
        );
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let e = channel_energy(compose_rgb(0, 0, 200));
        assert!(!InkBand { lower: e, upper: u64::MAX }.is_ink(compose_rgb(0, 0, 200)));
        assert!(!InkBand { lower: 0, upper: e }.is_ink(compose_rgb(0, 0, 200)));
        assert!(InkBand { lower: e - 1, upper: e + 1 }.is_ink(compose_rgb(0, 0, 200)));
    }

    #[test]
    fn test_empty_band_rejected() {
        assert!(InkBand::new(10, 10).is_err());
        assert!(InkBand::new(10, 11).is_err());
        assert!(InkBand::new(10, 12).is_ok());
    }

    #[test]
    fn test_mask_and_count() {
        let pix = Pix::from_raster(
            3,
            1,
            vec![compose_rgb(255, 255, 255), compose_rgb(0, 0, 200), compose_rgb(0, 0, 0)],
        )
        .unwrap();
        let band = InkBand::default();
        assert_eq!(band.mask(&pix), vec![false, true, false]);
        assert_eq!(band.count(&pix), 1);
    }
}
