//! petri-test - Regression test support
//!
//! Shared machinery for the `tests/*_reg.rs` suites:
//!
//! - [`RegParams`] - indexed comparisons with failure accumulation and
//!   an end-of-test summary
//! - synthetic builders for pixel buffers and P6 byte streams
//!
//! # Usage
//!
//! ```
//! use petri_test::RegParams;
//!
//! let mut rp = RegParams::new("example");
//! rp.compare_values(3.0, 3.0, 0.0);
//! assert!(rp.cleanup());
//! ```

mod params;
mod synth;

pub use params::RegParams;
pub use synth::{binary_from_rows, gray_from_p6, p6_bytes, solid_p6, uniform_buffer};
