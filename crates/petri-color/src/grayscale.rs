//! RGB to grayscale conversion
//!
//! First stage of the pipeline: collapses a stream of RGB triplets into
//! a single-channel luma buffer, and mirrors each luma value back out as
//! an (L, L, L) triplet for the grayscale artifact.
//!
//! The scalar [`luma`] function is the semantic ground truth. Any faster
//! path (the optional `parallel` row split) must reproduce its output
//! bit for bit; an approximate fixed-point substitute is not acceptable
//! because truncation decides foreground/background downstream.

use crate::error::ColorResult;
use petri_core::PixelBuffer;
use std::io::{Read, Write};

/// Luma weight of the red channel.
pub const LUMA_RED: f64 = 0.2989;
/// Luma weight of the green channel.
pub const LUMA_GREEN: f64 = 0.5870;
/// Luma weight of the blue channel.
pub const LUMA_BLUE: f64 = 0.1140;

/// Weighted grayscale intensity of one RGB pixel.
///
/// Truncates toward zero rather than rounding. The weights sum to
/// 0.9999, so a saturated white pixel (255, 255, 255) maps to 254.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (LUMA_RED * f64::from(r) + LUMA_GREEN * f64::from(g) + LUMA_BLUE * f64::from(b)) as u8
}

/// Convert `width * height` RGB triplets from `reader` into a luma
/// buffer, writing each value as an (L, L, L) triplet to `sink` in
/// raster order.
///
/// # Errors
///
/// Returns [`ColorError::Io`](crate::ColorError::Io) if fewer than
/// `width * height * 3` bytes are available from `reader` or the sink
/// cannot be written, and [`ColorError::Core`](crate::ColorError::Core)
/// for invalid dimensions or allocation failure.
pub fn gray_from_rgb_stream<R: Read, W: Write>(
    reader: &mut R,
    width: usize,
    height: usize,
    sink: &mut W,
) -> ColorResult<PixelBuffer> {
    let mut out = PixelBuffer::new(width, height)?;

    let len = out.len() * 3;
    let mut rgb = Vec::new();
    rgb.try_reserve_exact(len)
        .map_err(|_| petri_core::Error::OutOfMemory { bytes: len })?;
    rgb.resize(len, 0);
    reader.read_exact(&mut rgb)?;

    convert(&rgb, &mut out);

    for &v in out.data() {
        sink.write_all(&[v, v, v])?;
    }
    Ok(out)
}

#[cfg(not(feature = "parallel"))]
fn convert(rgb: &[u8], out: &mut PixelBuffer) {
    for (dst, px) in out.data_mut().iter_mut().zip(rgb.chunks_exact(3)) {
        *dst = luma(px[0], px[1], px[2]);
    }
}

/// Row-split conversion. Each worker owns a disjoint output row range
/// and reads only its own slice of the input block, so the result is
/// identical to the scalar loop.
#[cfg(feature = "parallel")]
fn convert(rgb: &[u8], out: &mut PixelBuffer) {
    use rayon::prelude::*;

    let width = out.width();
    out.data_mut()
        .par_chunks_mut(width)
        .zip(rgb.par_chunks(width * 3))
        .for_each(|(dst_row, src_row)| {
            for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(3)) {
                *dst = luma(px[0], px[1], px[2]);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_luma_black_and_white() {
        assert_eq!(luma(0, 0, 0), 0);
        // 255 * 0.9999 truncates to 254, not 255.
        assert_eq!(luma(255, 255, 255), 254);
    }

    #[test]
    fn test_luma_pure_channels() {
        assert_eq!(luma(255, 0, 0), 76); // 76.2195
        assert_eq!(luma(0, 255, 0), 149); // 149.685
        assert_eq!(luma(0, 0, 255), 29); // 29.07
    }

    #[test]
    fn test_luma_truncates_toward_zero() {
        // 0.2989*100 + 0.587*50 + 0.114*25 = 62.09 -> 62
        assert_eq!(luma(100, 50, 25), 62);
    }

    #[test]
    fn test_gray_gray_input() {
        for k in [0u8, 1, 127, 254, 255] {
            let expected = (0.9999 * f64::from(k)) as u8;
            assert_eq!(luma(k, k, k), expected);
        }
    }

    #[test]
    fn test_stream_conversion_and_side_effect() {
        // 2x1 image: one red pixel, one white pixel.
        let rgb = vec![255, 0, 0, 255, 255, 255];
        let mut sink = Vec::new();
        let buf = gray_from_rgb_stream(&mut Cursor::new(rgb), 2, 1, &mut sink).unwrap();

        assert_eq!(buf.data(), &[76, 254]);
        assert_eq!(sink, vec![76, 76, 76, 254, 254, 254]);
    }

    #[test]
    fn test_short_stream_is_an_io_error() {
        // 2x2 image needs 12 bytes; provide 7.
        let rgb = vec![0u8; 7];
        let mut sink = Vec::new();
        let err = gray_from_rgb_stream(&mut Cursor::new(rgb), 2, 2, &mut sink).unwrap_err();
        assert!(matches!(err, crate::ColorError::Io(_)));
    }

    #[test]
    fn test_matches_scalar_ground_truth() {
        // Deterministic pseudo-random pixels; whatever path convert()
        // takes, every byte must equal the scalar luma() result.
        let (w, h) = (19, 7);
        let rgb: Vec<u8> = (0..w * h * 3)
            .map(|i| ((i * 131 + 89) % 256) as u8)
            .collect();
        let mut sink = std::io::sink();
        let buf = gray_from_rgb_stream(&mut Cursor::new(rgb.clone()), w, h, &mut sink).unwrap();
        for (i, px) in rgb.chunks_exact(3).enumerate() {
            assert_eq!(buf.data()[i], luma(px[0], px[1], px[2]));
        }
    }
}
