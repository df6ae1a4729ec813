//! Connected component counting
//!
//! Final stage of the pipeline: labels 8-connected foreground regions
//! of a binarized buffer and reports how many there are. Labeling uses
//! an iterative flood fill with an explicit work list, never recursion,
//! so stack depth is independent of component size.
//!
//! The binary buffer is wrapped in a zero border before scanning.
//! Border cells read as background, so the 3x3 neighborhood of any
//! interior pixel can be examined without bounds checks.

use crate::error::RegionResult;
use petri_core::{BACKGROUND, PaddedBuffer, PixelBuffer};
use std::collections::VecDeque;

/// Per-pixel component labels for a binarized buffer.
///
/// 0 means unlabeled background; values >= 1 identify components in
/// discovery order (raster order of their first pixel). Labels are
/// dense: a map with `count` components uses exactly `1..=count`.
#[derive(Debug, Clone)]
pub struct LabelMap {
    width: usize,
    height: usize,
    labels: Vec<u32>,
}

impl LabelMap {
    fn new(width: usize, height: usize) -> RegionResult<Self> {
        let len = width * height;
        let mut labels = Vec::new();
        labels
            .try_reserve_exact(len)
            .map_err(|_| petri_core::Error::OutOfMemory {
                bytes: len * size_of::<u32>(),
            })?;
        labels.resize(len, 0);
        Ok(LabelMap {
            width,
            height,
            labels,
        })
    }

    /// Map width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Map height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the label at (row, col), or `None` when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.height && col < self.width {
            Some(self.labels[row * self.width + col])
        } else {
            None
        }
    }

    /// Raw access to the labels in raster order.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.labels
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> u32 {
        self.labels[row * self.width + col]
    }

    #[inline]
    fn set_at(&mut self, row: usize, col: usize, label: u32) {
        self.labels[row * self.width + col] = label;
    }
}

/// Count 8-connected foreground regions of a binarized buffer.
///
/// # Errors
///
/// Returns [`RegionError::Core`](crate::RegionError::Core) if the
/// padded buffer or label map cannot be allocated.
pub fn count_components(binary: &PixelBuffer) -> RegionResult<u32> {
    let (_, count) = label_components(binary)?;
    Ok(count)
}

/// Label all 8-connected foreground regions of a binarized buffer.
///
/// Scans in raster order; each unlabeled foreground pixel seeds a new
/// component and an iterative flood fill claims the rest of it. Every
/// foreground pixel is labeled exactly once (the label-zero guard
/// prevents re-visits), so total work is O(width * height). Background
/// pixels are never labeled or placed on the work list.
///
/// Returns the label map and the component count.
pub fn label_components(binary: &PixelBuffer) -> RegionResult<(LabelMap, u32)> {
    let padded = PaddedBuffer::from_buffer(binary)?;
    let mut labels = LabelMap::new(binary.width(), binary.height())?;

    // Pending pixels in padded coordinates. Grows on demand; a single
    // component can cover the whole image, so a fixed bound would lose
    // pixels.
    let mut work: VecDeque<(usize, usize)> = VecDeque::new();
    let mut next_label: u32 = 1;

    for row in 1..=binary.height() {
        for col in 1..=binary.width() {
            if padded.get(row, col) == BACKGROUND || labels.at(row - 1, col - 1) != 0 {
                continue;
            }

            labels.set_at(row - 1, col - 1, next_label);
            work.push_back((row, col));

            while let Some((r, c)) = work.pop_front() {
                // Full 3x3 block around (r, c). The center is already
                // labeled, so the guard skips it; the zero border keeps
                // every generated coordinate inside the padded buffer.
                for nr in (r - 1)..=(r + 1) {
                    for nc in (c - 1)..=(c + 1) {
                        if padded.get(nr, nc) != BACKGROUND && labels.at(nr - 1, nc - 1) == 0 {
                            labels.set_at(nr - 1, nc - 1, next_label);
                            work.push_back((nr, nc));
                        }
                    }
                }
            }

            next_label += 1;
        }
    }

    Ok((labels, next_label - 1))
}
