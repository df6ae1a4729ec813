//! petri-filter - Smoothing and binarization
//!
//! This crate provides the fused third stage of the pipeline:
//!
//! - [`Kernel`] - normalized 3x3 convolution kernel, canonical
//!   binomial constructor
//! - [`blur_and_threshold`] - one traversal producing the blurred and
//!   binarized buffers plus their artifact streams
//!
//! With the `parallel` feature the traversal is split across rows with
//! rayon; buffers and streams are bit-identical to the scalar path.

mod blur;
mod error;
mod kernel;

pub use blur::{DEFAULT_THRESHOLD, blur_and_threshold};
pub use error::{FilterError, FilterResult};
pub use kernel::{KERNEL_SIZE, Kernel};
