//! I/O error types
//!
//! Provides a unified error type for pixel-map I/O. The header reader
//! and payload helpers map their failures into `IoError` variants so
//! that callers only need to handle one error type, and so that a
//! malformed file is distinguishable from a plain read failure.

use thiserror::Error;

/// Error type for pixel-map I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream does not begin with the expected magic number
    #[error("bad magic number: expected \"P6\", found {found:?}")]
    BadMagic {
        /// The two bytes actually read
        found: String,
    },

    /// A required numeric header field cannot be parsed
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The pixel payload does not hold `width * height * 3` bytes
    #[error("pixel payload is {got} bytes, expected {expected}")]
    PayloadSize { expected: usize, got: usize },

    /// An error from the core buffer library
    #[error("core error: {0}")]
    Core(#[from] petri_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
