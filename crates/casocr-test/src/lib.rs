//! casocr-test - Regression test harness for casocr
//!
//! - [`RegParams`]: numbered comparisons that accumulate failures and
//!   report them once at [`RegParams::cleanup`]
//! - [`synth`]: deterministic synthetic captchas built from glyph bitmaps
//!
//! # Usage
//!
//! ```ignore
//! use casocr_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(4.0, blobs.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to also write images under `tests/regout`

mod error;
mod params;
pub mod synth;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // casocr-test is at crates/casocr-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
