//! petri-io - Pixel-map I/O for the colony counter
//!
//! Every artifact of a run (input micrograph, grayscale, blurred and
//! thresholded outputs) uses one fixed binary format: a P6 pixel map.
//! This crate owns its header grammar and payload helpers:
//!
//! - [`read_header`] / [`write_header`] - the ASCII header, with a
//!   strict default and an opt-in comment-tolerant reader
//! - [`read_p6`] / [`write_p6`] - whole images as raw RGB payloads
//! - [`write_gray`] - single-channel buffers replicated to three
//!   channels

mod error;
mod pnm;

pub use error::{IoError, IoResult};
pub use pnm::{
    HeaderTolerance, MAXVAL, PnmHeader, read_header, read_p6, write_gray, write_header, write_p6,
};
