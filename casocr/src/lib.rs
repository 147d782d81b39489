//! casocr - Captcha solver
//!
//! Solves the four-character image captcha of a login portal with a small
//! trained model instead of a general OCR engine.
//!
//! # Overview
//!
//! - Image I/O (PNG, JPEG)
//! - Ink classification and connected-glyph segmentation
//! - Glyph features, nearest-centroid classification
//! - Incremental training with a persistent binary model
//!
//! # Example
//!
//! ```
//! use casocr::recog::{Model, RecogOptions, Recognizer};
//! use casocr::Pix;
//!
//! let recognizer = Recognizer::new(&Model::new(), RecogOptions::default()).unwrap();
//! let pix = Pix::new(90, 32).unwrap();
//! assert_eq!(recognizer.recognize(&pix), "");
//! ```

// Re-export core types (primary data structures used everywhere)
pub use casocr_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use casocr_io as io;
pub use casocr_recog as recog;
pub use casocr_region as region;
