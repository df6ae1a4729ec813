//! Error types for petri-color

use thiserror::Error;

/// Errors that can occur during grayscale conversion
#[derive(Debug, Error)]
pub enum ColorError {
    /// Reading the RGB stream or writing the gray stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] petri_core::Error),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
