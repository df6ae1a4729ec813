//! petri-core - Pixel buffer data structures for colony counting
//!
//! This crate provides the data structures shared by every pipeline
//! stage:
//!
//! - [`PixelBuffer`] - contiguous single-channel intensity buffer
//! - [`PaddedBuffer`] - zero-border wrapper for neighborhood access
//! - [`FOREGROUND`] / [`BACKGROUND`] - binarized pixel vocabulary
//!
//! Buffers are row-major `Vec<u8>` stores addressed as
//! `row * width + col`; there are no per-row pointer tables, so every
//! stage shares one bounds-checked accessor.

mod border;
mod buffer;
pub mod error;

pub use border::{PAD, PaddedBuffer};
pub use buffer::{BACKGROUND, FOREGROUND, PixelBuffer};
pub use error::{Error, Result};
