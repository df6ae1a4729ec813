//! petri-color - Grayscale conversion
//!
//! This crate provides the first pipeline stage: collapsing RGB
//! micrograph pixels to weighted luma intensities.
//!
//! - [`luma`] - scalar per-pixel conversion (the ground truth)
//! - [`gray_from_rgb_stream`] - whole-image conversion with the
//!   grayscale artifact written as a side effect
//!
//! With the `parallel` feature the conversion is split across rows with
//! rayon; the output is bit-identical to the scalar path.

mod error;
mod grayscale;

pub use error::{ColorError, ColorResult};
pub use grayscale::{LUMA_BLUE, LUMA_GREEN, LUMA_RED, gray_from_rgb_stream, luma};
