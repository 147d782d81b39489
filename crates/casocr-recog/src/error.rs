//! Error types for casocr-recog

use thiserror::Error;

/// Errors that can occur during training and recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] casocr_core::Error),

    /// Segmentation error
    #[error("segmentation error: {0}")]
    Region(#[from] casocr_region::RegionError),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Feature extraction on a blob with no pixels
    #[error("cannot extract features from an empty blob")]
    EmptyBlob,

    /// Wrong number of significant blobs.
    ///
    /// When too many blobs are found the scan stops early, so `found` is a
    /// lower bound.
    #[error("expected {expected} glyphs, found {found}")]
    GlyphCount { expected: usize, found: usize },

    /// Classification against a model with no labels
    #[error("classifier has no trained labels")]
    EmptyClassifier,

    /// Training label of the wrong length
    #[error("label {label:?} must have exactly {expected} characters")]
    InvalidLabel { label: String, expected: usize },

    /// Malformed model data
    #[error("invalid model data: {0}")]
    ModelFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
