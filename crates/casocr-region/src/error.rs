//! Error types for casocr-region

use thiserror::Error;

/// Errors that can occur during segmentation
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] casocr_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The traversal queue filled up while growing a component.
    ///
    /// Real glyphs never get close to the bound, so this means the input
    /// is not a captcha of the expected kind.
    #[error("traversal queue overflow (capacity {capacity}) in component seeded at ({x}, {y})")]
    QueueOverflow { capacity: usize, x: u32, y: u32 },
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
