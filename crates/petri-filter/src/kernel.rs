//! Convolution kernels
//!
//! A [`Kernel`] is a fixed 3x3 matrix of non-negative weights summing
//! to 1, applied to the neighborhood of each pixel during smoothing.

use crate::{FilterError, FilterResult};

/// Kernel side length. The pipeline convolves 3x3 neighborhoods only.
pub const KERNEL_SIZE: usize = 3;

/// A normalized 3x3 convolution kernel.
///
/// Weights are row-major, non-negative, and sum to 1 so that smoothing
/// preserves the intensity of uniform regions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    weights: [[f32; KERNEL_SIZE]; KERNEL_SIZE],
}

impl Kernel {
    /// The canonical binomial smoothing kernel,
    /// `[[1,2,1],[2,4,2],[1,2,1]] / 16`.
    ///
    /// Every weight is an exact binary fraction, so convolving a
    /// uniform image reproduces its intensity exactly.
    pub const fn binomial() -> Self {
        Kernel {
            weights: [
                [0.0625, 0.125, 0.0625],
                [0.125, 0.25, 0.125],
                [0.0625, 0.125, 0.0625],
            ],
        }
    }

    /// Build a kernel from explicit weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernel`] if any weight is negative
    /// or not finite, or if the weights do not sum to 1.
    pub fn from_weights(weights: [[f32; KERNEL_SIZE]; KERNEL_SIZE]) -> FilterResult<Self> {
        for row in &weights {
            for &w in row {
                if !w.is_finite() || w < 0.0 {
                    return Err(FilterError::InvalidKernel(format!(
                        "weight {w} is negative or not finite"
                    )));
                }
            }
        }
        let sum: f32 = weights.iter().flatten().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(FilterError::InvalidKernel(format!(
                "weights sum to {sum}, expected 1"
            )));
        }
        Ok(Kernel { weights })
    }

    /// Borrow the weight matrix.
    #[inline]
    pub fn weights(&self) -> &[[f32; KERNEL_SIZE]; KERNEL_SIZE] {
        &self.weights
    }

    /// Get the weight at kernel row `ky`, column `kx`.
    ///
    /// # Panics
    ///
    /// Panics if either index is outside `0..3`.
    #[inline]
    pub fn get(&self, ky: usize, kx: usize) -> f32 {
        self.weights[ky][kx]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.weights.iter().flatten().sum()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::binomial()
    }
}
