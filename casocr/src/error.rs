//! Error types for the casocr binary

use thiserror::Error;

/// Errors surfaced by CLI commands
#[derive(Debug, Error)]
pub enum CliError {
    /// Image decoding or encoding failed
    #[error("image error on '{path}': {source}")]
    Image {
        path: String,
        source: casocr_io::IoError,
    },

    /// Training, recognition or model persistence failed
    #[error(transparent)]
    Recog(#[from] casocr_recog::RecogError),

    /// Invalid command-line usage
    #[error("{0}")]
    Usage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI commands
pub type CliResult<T> = Result<T, CliError>;
