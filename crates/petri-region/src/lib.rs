//! petri-region - Connected component analysis
//!
//! This crate provides the final pipeline stage:
//!
//! - [`count_components`] - number of 8-connected foreground regions
//! - [`label_components`] - the full [`LabelMap`] plus the count
//!
//! Labeling is an iterative flood fill over a zero-padded copy of the
//! binarized buffer: raster scan for unlabeled foreground seeds, then
//! an explicit work list claims each component. Deterministic and
//! single-threaded; labels depend only on raster order.

mod conncomp;
mod error;

pub use conncomp::{LabelMap, count_components, label_components};
pub use error::{RegionError, RegionResult};
