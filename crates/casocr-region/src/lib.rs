//! casocr-region - Ink classification and glyph segmentation
//!
//! This crate turns a decoded captcha into the connected ink regions
//! that make up its characters:
//!
//! - **Ink band**: pixels whose color energy lies strictly inside a band
//! - **Segmentation**: column-major seed scan with bounded breadth-first traversal
//! - **Debug rendering**: highlight what the band classifies as ink
//!
//! # Examples
//!
//! ```
//! use casocr_core::{Pix, PixMut, color};
//! use casocr_region::{segment, SegmentOptions};
//!
//! let mut pm = PixMut::new_filled(10, 10, color::compose_rgb(255, 255, 255)).unwrap();
//! pm.set_rgb(2, 2, 0, 0, 200).unwrap();
//! pm.set_rgb(3, 3, 0, 0, 200).unwrap();
//! pm.set_rgb(7, 1, 0, 0, 200).unwrap();
//! let pix: Pix = pm.into();
//!
//! let blobs = segment(&pix, &SegmentOptions::default()).unwrap();
//! assert_eq!(blobs.len(), 2);
//! assert_eq!(blobs[0].len(), 2);
//! ```

pub mod conncomp;
pub mod debug;
pub mod error;
pub mod ink;

pub use conncomp::{
    Blob, ConnectivityType, DEFAULT_QUEUE_CAPACITY, SegmentOptions, Segments, segment,
};
pub use debug::{HIGHLIGHT, render_ink};
pub use error::{RegionError, RegionResult};
pub use ink::{DEFAULT_INK_LOWER, DEFAULT_INK_UPPER, InkBand, channel_energy};
