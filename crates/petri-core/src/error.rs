//! Error types for petri-core
//!
//! Provides a unified error type for buffer construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// petri-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// Pixel coordinate outside the buffer
    #[error("pixel out of bounds: ({row}, {col}) in {width}x{height}")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },

    /// Raw data length does not match the declared dimensions
    #[error("buffer length {len} does not match {width}x{height}")]
    LengthMismatch {
        len: usize,
        width: usize,
        height: usize,
    },

    /// Memory allocation failed for a width*height-sized structure
    #[error("memory allocation failed for {bytes} bytes")]
    OutOfMemory { bytes: usize },
}

/// Result type alias for petri-core operations
pub type Result<T> = std::result::Result<T, Error>;
