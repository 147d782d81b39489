//! Significant-blob selection shared by training and recognition

use crate::error::{RecogError, RecogResult};
use crate::features::{GlyphFeatures, extract_features};
use crate::options::RecogOptions;
use casocr_core::Pix;
use casocr_region::{Blob, Segments};
use tracing::trace;

/// Segment `pix` and keep blobs larger than the noise floor.
///
/// Fails as soon as more than `glyph_count` blobs survive, or after the scan
/// if fewer do.
pub(crate) fn significant_blobs(pix: &Pix, options: &RecogOptions) -> RecogResult<Vec<Blob>> {
    let expected = options.glyph_count;
    let mut kept = Vec::with_capacity(expected);

    for blob in Segments::new(pix, &options.segment)? {
        let blob = blob?;
        if blob.len() <= options.noise_floor {
            trace!(size = blob.len(), "dropping noise blob");
            continue;
        }
        if kept.len() == expected {
            return Err(RecogError::GlyphCount {
                expected,
                found: expected + 1,
            });
        }
        kept.push(blob);
    }

    if kept.len() != expected {
        return Err(RecogError::GlyphCount {
            expected,
            found: kept.len(),
        });
    }
    Ok(kept)
}

/// Feature descriptors of the significant blobs, in reading order.
pub(crate) fn glyph_features(pix: &Pix, options: &RecogOptions) -> RecogResult<Vec<GlyphFeatures>> {
    significant_blobs(pix, options)?
        .iter()
        .map(extract_features)
        .collect()
}
