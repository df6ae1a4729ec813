//! petri - Colony counting for P6 micrographs
//!
//! Counts discrete colony-like blobs in a micrograph by converting the
//! image to grayscale, smoothing it with a 3x3 binomial kernel,
//! binarizing against a threshold, and counting 8-connected foreground
//! regions.
//!
//! # Overview
//!
//! The pipeline is strictly sequential; each stage materializes its
//! buffer before the next begins:
//!
//! 1. Grayscale conversion ([`color`])
//! 2. Zero-border padding ([`PaddedBuffer`])
//! 3. Fused blur + threshold ([`filter`])
//! 4. Connected-component counting ([`region`])
//!
//! # Example
//!
//! ```no_run
//! use petri::pipeline::{self, OutputPaths, PipelineParams};
//!
//! let report = pipeline::run(
//!     "bactery_colony_input.ppm",
//!     &OutputPaths::default(),
//!     &PipelineParams::default(),
//! )?;
//! println!("Number of colonies: {}", report.colony_count);
//! # Ok::<(), petri::pipeline::PipelineError>(())
//! ```

// Re-export core types (primary data structures used everywhere)
pub use petri_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use petri_color as color;
pub use petri_filter as filter;
pub use petri_io as io;
pub use petri_region as region;

pub mod pipeline;

pub use pipeline::{OutputPaths, PipelineError, PipelineParams, PipelineReport};
