//! Zero-border padding
//!
//! Wraps a [`PixelBuffer`] with a 1-pixel ring of zeros so that
//! neighborhood code (convolution, flood fill) can read the full 3x3
//! block around any interior pixel without bounds checks. Border cells
//! always read 0 and therefore always classify as background.

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Width of the zero ring added on each side.
pub const PAD: usize = 1;

/// A `(width + 2) x (height + 2)` buffer whose border ring is always 0
/// and whose interior is an exact copy of the source buffer.
///
/// Interior cells live at rows `1..=height` and cols `1..=width` of the
/// padded coordinate space.
///
/// # Examples
///
/// ```
/// use petri_core::{PaddedBuffer, PixelBuffer};
///
/// let mut src = PixelBuffer::new(2, 2).unwrap();
/// src.set(0, 0, 50).unwrap();
/// let padded = PaddedBuffer::from_buffer(&src).unwrap();
/// assert_eq!(padded.get(0, 0), 0);
/// assert_eq!(padded.get(1, 1), 50);
/// ```
#[derive(Debug, Clone)]
pub struct PaddedBuffer {
    /// Padded width (`interior + 2`)
    width: usize,
    /// Padded height (`interior + 2`)
    height: usize,
    data: Vec<u8>,
}

impl PaddedBuffer {
    /// Copy `src` into the interior of a new zero-initialized buffer.
    ///
    /// Pure function: reads the source once, touches nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the padded store cannot be
    /// allocated.
    pub fn from_buffer(src: &PixelBuffer) -> Result<Self> {
        let width = src.width() + 2 * PAD;
        let height = src.height() + 2 * PAD;
        let len = width * height;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| Error::OutOfMemory { bytes: len })?;
        data.resize(len, 0);

        for (row, src_row) in src.rows().enumerate() {
            let start = (row + PAD) * width + PAD;
            data[start..start + src.width()].copy_from_slice(src_row);
        }

        Ok(PaddedBuffer {
            width,
            height,
            data,
        })
    }

    /// Padded width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Padded height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width of the interior (the original buffer).
    #[inline]
    pub fn interior_width(&self) -> usize {
        self.width - 2 * PAD
    }

    /// Height of the interior (the original buffer).
    #[inline]
    pub fn interior_height(&self) -> usize {
        self.height - 2 * PAD
    }

    /// Read a cell of the padded coordinate space.
    ///
    /// Defined for every `row < height` and `col < width`, border ring
    /// included; border cells read 0.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the padded buffer.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        assert!(row < self.height && col < self.width);
        self.data[row * self.width + col]
    }

    /// Borrow one padded row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    /// Copy the interior back out as a fresh [`PixelBuffer`].
    pub fn interior(&self) -> Result<PixelBuffer> {
        let iw = self.interior_width();
        let ih = self.interior_height();
        let mut out = PixelBuffer::new(iw, ih)?;
        for row in 0..ih {
            let start = (row + PAD) * self.width + PAD;
            out.row_mut(row).copy_from_slice(&self.data[start..start + iw]);
        }
        Ok(out)
    }
}
