//! casocr-recog - Captcha glyph recognition
//!
//! This crate turns segmented glyphs into characters:
//!
//! - **Features**: bounding-box size, pixel count and quadrant histogram
//! - **Model**: per-label sample counts and feature sums, with a binary format
//! - **Classifier**: nearest centroid over the quadrant histogram
//! - **Training**: all-or-nothing labeled samples, plus session statistics
//! - **Recognizer**: segmentation, noise and count policy, classification
//!
//! # Quick Start
//!
//! ```no_run
//! use casocr_recog::{Model, RecogOptions, Recognizer};
//!
//! let model = Model::read_from_file("model.bin").unwrap();
//! let recognizer = Recognizer::new(&model, RecogOptions::default()).unwrap();
//!
//! let pix = casocr_core::Pix::new(90, 32).unwrap();
//! let text = recognizer.recognize(&pix);
//! if text.is_empty() {
//!     println!("captcha not recognized");
//! }
//! ```

pub mod classify;
mod error;
pub mod features;
pub mod model;
pub mod options;
pub mod recognize;
mod select;
pub mod train;

pub use error::{RecogError, RecogResult};

pub use classify::{Centroid, Classifier, Match};
pub use features::{GlyphFeatures, extract_features};
pub use model::{Accumulator, MAX_MODEL_LABELS, MODEL_MAGIC, MODEL_VERSION, Model};
pub use options::{DEFAULT_GLYPH_COUNT, DEFAULT_NOISE_FLOOR, RecogOptions};
pub use recognize::Recognizer;
pub use train::Trainer;

// Re-export lower crates for convenience
pub use casocr_core;
pub use casocr_region;
