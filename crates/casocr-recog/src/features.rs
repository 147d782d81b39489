//! Glyph feature extraction
//!
//! A blob is reduced to its bounding-box size, its pixel count and a
//! four-bucket histogram of where its pixels fall relative to the center
//! of the bounding box.

use crate::error::{RecogError, RecogResult};
use casocr_region::Blob;
use std::ops::AddAssign;

/// Histogram bucket: left of and above the center (inclusive)
pub const QUADRANT_TOP_LEFT: usize = 0;
/// Histogram bucket: right of the center
pub const QUADRANT_TOP_RIGHT: usize = 1;
/// Histogram bucket: below the center
pub const QUADRANT_BOTTOM_LEFT: usize = 2;
/// Histogram bucket: right of and below the center
pub const QUADRANT_BOTTOM_RIGHT: usize = 3;

/// Feature descriptor of one glyph.
///
/// The same type holds a single sample, a per-label sum and a per-label
/// mean, so every field is `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlyphFeatures {
    /// Bounding-box width
    pub width: f64,
    /// Bounding-box height
    pub height: f64,
    /// Number of pixels
    pub pixels: f64,
    /// Pixel counts per quadrant, indexed by `QUADRANT_*`
    pub quadrants: [f64; 4],
}

impl GlyphFeatures {
    /// Number of scalar fields
    pub const FIELDS: usize = 7;

    /// Fields in storage order: width, height, pixels, q0..q3.
    pub fn to_array(&self) -> [f64; Self::FIELDS] {
        let [q0, q1, q2, q3] = self.quadrants;
        [self.width, self.height, self.pixels, q0, q1, q2, q3]
    }

    /// Inverse of [`to_array`](Self::to_array).
    pub fn from_array(a: [f64; Self::FIELDS]) -> Self {
        Self {
            width: a[0],
            height: a[1],
            pixels: a[2],
            quadrants: [a[3], a[4], a[5], a[6]],
        }
    }

    /// Every field divided by `n`.
    pub fn scaled_down(&self, n: f64) -> Self {
        Self::from_array(self.to_array().map(|v| v / n))
    }

    /// Squared Euclidean distance over the quadrant histogram only.
    pub fn quadrant_distance(&self, other: &Self) -> f64 {
        self.quadrants
            .iter()
            .zip(&other.quadrants)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

impl AddAssign<&GlyphFeatures> for GlyphFeatures {
    fn add_assign(&mut self, rhs: &GlyphFeatures) {
        self.width += rhs.width;
        self.height += rhs.height;
        self.pixels += rhs.pixels;
        for (q, r) in self.quadrants.iter_mut().zip(&rhs.quadrants) {
            *q += r;
        }
    }
}

/// Compute the feature descriptor of a blob.
///
/// The center is the floor midpoint of the bounding box; a pixel goes to
/// bucket `(x > cx) | (y > cy) << 1`.
pub fn extract_features(blob: &Blob) -> RecogResult<GlyphFeatures> {
    let bounds = blob.bounding_box().ok_or(RecogError::EmptyBlob)?;
    let center = bounds.midpoint();

    let mut quadrants = [0.0; 4];
    for p in blob.points() {
        let bucket = usize::from(p.x > center.x) | (usize::from(p.y > center.y) << 1);
        quadrants[bucket] += 1.0;
    }

    Ok(GlyphFeatures {
        width: f64::from(bounds.w),
        height: f64::from(bounds.h),
        pixels: blob.len() as f64,
        quadrants,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use casocr_core::Point;

    fn rect(x0: u32, y0: u32, w: u32, h: u32) -> Blob {
        (y0..y0 + h)
            .flat_map(|y| (x0..x0 + w).map(move |x| Point::new(x, y)))
            .collect()
    }

    #[test]
    fn test_empty_blob() {
        assert!(matches!(
            extract_features(&Blob::default()),
            Err(RecogError::EmptyBlob)
        ));
    }

    #[test]
    fn test_single_pixel() {
        let f = extract_features(&rect(7, 9, 1, 1)).unwrap();
        assert_eq!((f.width, f.height, f.pixels), (1.0, 1.0, 1.0));
        assert_eq!(f.quadrants, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_block_histogram() {
        // 4x5 block: center (x0+1, y0+2)
        let f = extract_features(&rect(10, 20, 4, 5)).unwrap();
        assert_eq!((f.width, f.height, f.pixels), (4.0, 5.0, 20.0));
        assert_eq!(f.quadrants[QUADRANT_TOP_LEFT], 6.0);
        assert_eq!(f.quadrants[QUADRANT_TOP_RIGHT], 6.0);
        assert_eq!(f.quadrants[QUADRANT_BOTTOM_LEFT], 4.0);
        assert_eq!(f.quadrants[QUADRANT_BOTTOM_RIGHT], 4.0);
    }

    #[test]
    fn test_translation_invariant() {
        let a = extract_features(&rect(0, 0, 3, 7)).unwrap();
        let b = extract_features(&rect(50, 13, 3, 7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_buckets_sum_to_pixels() {
        let blob: Blob = [(0, 0), (5, 1), (2, 2), (3, 3), (1, 4), (4, 4)]
            .into_iter()
            .map(Point::from)
            .collect();
        let f = extract_features(&blob).unwrap();
        assert_eq!(f.quadrants.iter().sum::<f64>(), f.pixels);
        assert_eq!((f.width, f.height), (6.0, 5.0));
    }

    #[test]
    fn test_array_roundtrip_and_arithmetic() {
        let f = GlyphFeatures {
            width: 1.0,
            height: 2.0,
            pixels: 3.0,
            quadrants: [4.0, 5.0, 6.0, 7.0],
        };
        assert_eq!(GlyphFeatures::from_array(f.to_array()), f);
        let mut sum = f;
        sum += &f;
        assert_eq!(sum.to_array(), [2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
        assert_eq!(sum.scaled_down(2.0), f);
    }

    #[test]
    fn test_quadrant_distance_ignores_size() {
        let a = GlyphFeatures {
            width: 100.0,
            quadrants: [1.0, 2.0, 3.0, 4.0],
            ..Default::default()
        };
        let b = GlyphFeatures {
            pixels: 7.0,
            quadrants: [1.0, 0.0, 3.0, 7.0],
            ..Default::default()
        };
        assert_eq!(a.quadrant_distance(&b), 13.0);
        assert_eq!(a.quadrant_distance(&a), 0.0);
    }
}
