//! Fused blur and threshold
//!
//! Third stage of the pipeline: one traversal over the zero-padded
//! grayscale buffer computes, per interior pixel, the 3x3 weighted sum
//! (truncated toward zero like the grayscale stage) and its
//! foreground/background classification. Both the blurred and the
//! binarized artifact streams are written during the same traversal.
//!
//! A blurred value `B` is foreground iff `B < threshold`; equality is
//! background. Colonies are darker than the plate, so below-threshold
//! pixels are the objects of interest.

use crate::error::FilterResult;
use crate::kernel::Kernel;
use petri_core::{BACKGROUND, FOREGROUND, PaddedBuffer, PixelBuffer};
use std::io::Write;

/// Default binarization threshold.
pub const DEFAULT_THRESHOLD: u8 = 145;

/// Blur `gray` with `kernel` and binarize against `threshold` in one
/// traversal, writing each blurred and binarized value as a replicated
/// (v, v, v) triplet to its sink in raster order.
///
/// Returns the blurred and binarized buffers, both shaped like `gray`.
///
/// # Errors
///
/// Returns [`FilterError::Core`](crate::FilterError::Core) for
/// allocation failure and [`FilterError::Io`](crate::FilterError::Io)
/// if a sink cannot be written.
pub fn blur_and_threshold<W1: Write, W2: Write>(
    gray: &PixelBuffer,
    kernel: &Kernel,
    threshold: u8,
    blurred_sink: &mut W1,
    thresh_sink: &mut W2,
) -> FilterResult<(PixelBuffer, PixelBuffer)> {
    let padded = PaddedBuffer::from_buffer(gray)?;
    let mut blurred = PixelBuffer::new(gray.width(), gray.height())?;
    let mut binary = PixelBuffer::new(gray.width(), gray.height())?;

    run(
        &padded,
        kernel,
        threshold,
        &mut blurred,
        &mut binary,
        blurred_sink,
        thresh_sink,
    )?;

    Ok((blurred, binary))
}

/// Weighted 3x3 sum around padded cell (row, col), truncated toward
/// zero. The caller guarantees (row, col) is an interior cell, so the
/// window never leaves the padded buffer.
#[inline]
fn convolve_at(kernel: &Kernel, padded: &PaddedBuffer, row: usize, col: usize) -> u8 {
    let mut sum = 0.0f32;
    for (ky, krow) in kernel.weights().iter().enumerate() {
        let line = padded.row(row + ky - 1);
        for (kx, &weight) in krow.iter().enumerate() {
            sum += weight * f32::from(line[col + kx - 1]);
        }
    }
    sum as u8
}

#[inline]
fn classify(blurred: u8, threshold: u8) -> u8 {
    if blurred < threshold {
        FOREGROUND
    } else {
        BACKGROUND
    }
}

#[cfg(not(feature = "parallel"))]
fn run<W1: Write, W2: Write>(
    padded: &PaddedBuffer,
    kernel: &Kernel,
    threshold: u8,
    blurred: &mut PixelBuffer,
    binary: &mut PixelBuffer,
    blurred_sink: &mut W1,
    thresh_sink: &mut W2,
) -> FilterResult<()> {
    let height = blurred.height();
    let width = blurred.width();
    for row in 0..height {
        for col in 0..width {
            let b = convolve_at(kernel, padded, row + 1, col + 1);
            let t = classify(b, threshold);
            blurred.row_mut(row)[col] = b;
            binary.row_mut(row)[col] = t;
            blurred_sink.write_all(&[b, b, b])?;
            thresh_sink.write_all(&[t, t, t])?;
        }
    }
    Ok(())
}

/// Row-split traversal. Workers share the read-only padded buffer (one
/// halo row per range boundary) and own disjoint output rows; the
/// artifact streams are then serialized from the finished buffers, so
/// every byte matches the scalar path.
#[cfg(feature = "parallel")]
fn run<W1: Write, W2: Write>(
    padded: &PaddedBuffer,
    kernel: &Kernel,
    threshold: u8,
    blurred: &mut PixelBuffer,
    binary: &mut PixelBuffer,
    blurred_sink: &mut W1,
    thresh_sink: &mut W2,
) -> FilterResult<()> {
    use rayon::prelude::*;

    let width = blurred.width();
    blurred
        .data_mut()
        .par_chunks_mut(width)
        .zip(binary.data_mut().par_chunks_mut(width))
        .enumerate()
        .for_each(|(row, (blur_row, bin_row))| {
            for col in 0..width {
                let b = convolve_at(kernel, padded, row + 1, col + 1);
                blur_row[col] = b;
                bin_row[col] = classify(b, threshold);
            }
        });

    for (&b, &t) in blurred.data().iter().zip(binary.data()) {
        blurred_sink.write_all(&[b, b, b])?;
        thresh_sink.write_all(&[t, t, t])?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::sink;

    fn uniform(width: usize, height: usize, v: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height).unwrap();
        buf.fill(v);
        buf
    }

    #[test]
    fn test_uniform_interior_is_preserved() {
        // Weights sum to 1, so blur(constant v) = v away from the
        // zero ring.
        let gray = uniform(7, 6, 200);
        let (blurred, _) = blur_and_threshold(
            &gray,
            &Kernel::binomial(),
            DEFAULT_THRESHOLD,
            &mut sink(),
            &mut sink(),
        )
        .unwrap();
        for row in 1..5 {
            for col in 1..6 {
                assert_eq!(blurred.get(row, col), Some(200));
            }
        }
        // Edge pixels darken toward the zero ring.
        assert!(blurred.get(0, 0).unwrap() < 200);
    }

    #[test]
    fn test_single_bright_pixel_spreads() {
        let mut gray = PixelBuffer::new(3, 3).unwrap();
        gray.set(1, 1, 160).unwrap();
        let (blurred, _) = blur_and_threshold(
            &gray,
            &Kernel::binomial(),
            DEFAULT_THRESHOLD,
            &mut sink(),
            &mut sink(),
        )
        .unwrap();
        // 160 * [0.25 center, 0.125 edge, 0.0625 corner]
        assert_eq!(blurred.get(1, 1), Some(40));
        assert_eq!(blurred.get(0, 1), Some(20));
        assert_eq!(blurred.get(0, 0), Some(10));
    }

    #[test]
    fn test_threshold_is_strict_less_than() {
        // Interior blurred value equals the uniform intensity, so a
        // buffer at exactly the threshold must classify background.
        let at = uniform(5, 5, DEFAULT_THRESHOLD);
        let (_, binary) = blur_and_threshold(
            &at,
            &Kernel::binomial(),
            DEFAULT_THRESHOLD,
            &mut sink(),
            &mut sink(),
        )
        .unwrap();
        assert_eq!(binary.get(2, 2), Some(BACKGROUND));

        let below = uniform(5, 5, DEFAULT_THRESHOLD - 1);
        let (_, binary) = blur_and_threshold(
            &below,
            &Kernel::binomial(),
            DEFAULT_THRESHOLD,
            &mut sink(),
            &mut sink(),
        )
        .unwrap();
        assert_eq!(binary.get(2, 2), Some(FOREGROUND));
    }

    #[test]
    fn test_sinks_receive_replicated_triplets() {
        let gray = uniform(2, 1, 0);
        let mut blurred_bytes = Vec::new();
        let mut thresh_bytes = Vec::new();
        blur_and_threshold(
            &gray,
            &Kernel::binomial(),
            DEFAULT_THRESHOLD,
            &mut blurred_bytes,
            &mut thresh_bytes,
        )
        .unwrap();
        assert_eq!(blurred_bytes, vec![0; 6]);
        // 0 < 145 everywhere, so both pixels are foreground.
        assert_eq!(thresh_bytes, vec![FOREGROUND; 6]);
    }

    #[test]
    fn test_black_image_is_all_foreground() {
        let gray = uniform(4, 4, 0);
        let (blurred, binary) = blur_and_threshold(
            &gray,
            &Kernel::binomial(),
            DEFAULT_THRESHOLD,
            &mut sink(),
            &mut sink(),
        )
        .unwrap();
        assert!(blurred.data().iter().all(|&v| v == 0));
        assert!(binary.data().iter().all(|&v| v == FOREGROUND));
    }
}
