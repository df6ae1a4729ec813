//! Error types for petri-region

use thiserror::Error;

/// Errors that can occur during component analysis
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] petri_core::Error),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
