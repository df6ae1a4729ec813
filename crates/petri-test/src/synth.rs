//! Synthetic image builders
//!
//! Small constructors for the buffers and P6 byte streams the
//! regression tests feed through the pipeline. Builders panic on
//! misuse; they are test support, not library surface.

use petri_core::{BACKGROUND, FOREGROUND, PixelBuffer};
use petri_io::HeaderTolerance;
use std::io::Cursor;

/// Full P6 byte stream from a raw RGB payload.
pub fn p6_bytes(width: usize, height: usize, rgb: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    petri_io::write_p6(&mut bytes, width, height, rgb).expect("payload length mismatch");
    bytes
}

/// P6 byte stream of a single solid color.
pub fn solid_p6(width: usize, height: usize, r: u8, g: u8, b: u8) -> Vec<u8> {
    let rgb: Vec<u8> = [r, g, b].repeat(width * height);
    p6_bytes(width, height, &rgb)
}

/// Uniform single-channel buffer.
pub fn uniform_buffer(width: usize, height: usize, v: u8) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height).expect("invalid dimensions");
    buf.fill(v);
    buf
}

/// Binarized buffer from 0/1 row literals; any nonzero cell becomes
/// foreground.
pub fn binary_from_rows(rows: &[&[u8]]) -> PixelBuffer {
    let width = rows[0].len();
    let data: Vec<u8> = rows
        .iter()
        .flat_map(|r| {
            assert_eq!(r.len(), width, "ragged rows");
            r.iter()
                .map(|&v| if v != 0 { FOREGROUND } else { BACKGROUND })
        })
        .collect();
    PixelBuffer::from_vec(width, rows.len(), data).expect("invalid dimensions")
}

/// Parse a P6 artifact whose three channels are expected to agree and
/// collapse it to a single-channel buffer.
///
/// Panics if any triplet has diverging channels; the pipeline's
/// artifacts always replicate one value.
pub fn gray_from_p6(bytes: &[u8]) -> PixelBuffer {
    let (header, payload) = petri_io::read_p6(&mut Cursor::new(bytes), HeaderTolerance::Strict)
        .expect("unreadable P6 stream");
    let data: Vec<u8> = payload
        .chunks_exact(3)
        .map(|px| {
            assert!(
                px[0] == px[1] && px[1] == px[2],
                "triplet {:?} is not gray",
                px
            );
            px[0]
        })
        .collect();
    PixelBuffer::from_vec(header.width, header.height, data).expect("invalid dimensions")
}
