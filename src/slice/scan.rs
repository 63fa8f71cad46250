use crate::foundation::core::{Axis, Region};
use crate::pixels::buffer::PixelBuffer;

/// Lazy, forward-only sequence of opaque [`Region`]s along one axis of a buffer.
///
/// A line (a column for [`Axis::Horizontal`], a row for [`Axis::Vertical`]) is opaque when at least
/// one of its samples has non-zero alpha. Consecutive opaque lines merge into one region; any
/// transparent line closes the current region. Regions come out in ascending `start` order and
/// never overlap. Every line of the buffer is inspected exactly once over the life of the scanner.
#[derive(Debug)]
pub struct RegionScanner<'a> {
    buf: &'a PixelBuffer,
    axis: Axis,
    next_line: u32,
    len: u32,
}

impl<'a> RegionScanner<'a> {
    pub fn new(buf: &'a PixelBuffer, axis: Axis) -> Self {
        Self {
            buf,
            axis,
            next_line: 0,
            len: axis.along(buf.width(), buf.height()),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Iterator for RegionScanner<'_> {
    type Item = Region;

    fn next(&mut self) -> Option<Region> {
        while self.next_line < self.len && !is_opaque_line(self.buf, self.axis, self.next_line) {
            self.next_line += 1;
        }
        if self.next_line >= self.len {
            return None;
        }

        let start = self.next_line;
        let mut end = start;
        self.next_line += 1;
        while self.next_line < self.len && is_opaque_line(self.buf, self.axis, self.next_line) {
            end = self.next_line;
            self.next_line += 1;
        }
        // The line that stopped the run is transparent (or past the end); skip it.
        self.next_line = self.next_line.saturating_add(1).min(self.len);
        Some(Region { start, end })
    }
}

impl std::iter::FusedIterator for RegionScanner<'_> {}

/// Start scanning `buf` for opaque regions along `axis`.
pub fn scan_regions(buf: &PixelBuffer, axis: Axis) -> RegionScanner<'_> {
    RegionScanner::new(buf, axis)
}

/// `true` when line `idx` along `axis` has any sample with alpha > 0.
///
/// Out-of-range indices are never opaque.
pub fn is_opaque_line(buf: &PixelBuffer, axis: Axis, idx: u32) -> bool {
    match axis {
        Axis::Horizontal => {
            if idx >= buf.width() {
                return false;
            }
            (0..buf.height()).any(|y| buf.alpha_unchecked(idx, y) > 0)
        }
        Axis::Vertical => buf
            .row(idx)
            .is_some_and(|row| row.chunks_exact(4).any(|px| px[3] > 0)),
    }
}

/// All opaque line indices along `axis`, ascending.
pub fn opaque_lines(buf: &PixelBuffer, axis: Axis) -> Vec<u32> {
    (0..axis.along(buf.width(), buf.height()))
        .filter(|&idx| is_opaque_line(buf, axis, idx))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/slice/scan.rs"]
mod tests;
