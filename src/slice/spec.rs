use crate::foundation::core::{Axis, Region};
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;
use crate::slice::scan::scan_regions;

/// Caller-facing slicing parameters, before they are resolved against a sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SliceParams {
    /// Tile length along the axis (the frame width for horizontal sheets).
    pub frame_width: Option<u32>,
    /// Tile extent across the axis; defaults to the sheet's full cross extent.
    pub frame_height: Option<u32>,
    /// Number of tiles; defaults to `axis_len / frame_width`.
    pub count: Option<u32>,
    pub axis: Axis,
    /// Cut variable-width frames from opaque regions instead of a fixed grid.
    pub auto_detect: bool,
}

impl SliceParams {
    /// Reject parameter sets that cannot describe a decomposition.
    ///
    /// Runs without touching pixels, so configuration errors surface before any scan.
    pub fn validate(&self) -> FramecutResult<()> {
        if self.frame_width.is_none() && self.count.is_none() {
            return Err(FramecutError::configuration(
                "either a frame width or a slice count must be specified",
            ));
        }
        if self.frame_width == Some(0) {
            return Err(FramecutError::configuration("frame width must be > 0"));
        }
        if self.frame_height == Some(0) {
            return Err(FramecutError::configuration("frame height must be > 0"));
        }
        if self.count == Some(0) {
            return Err(FramecutError::configuration("slice count must be > 0"));
        }
        if self.frame_height.is_some() && self.frame_width.is_none() {
            return Err(FramecutError::configuration(
                "frame height is only valid together with a frame width",
            ));
        }
        Ok(())
    }
}

/// Concrete decomposition of one sheet into frames.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SliceSpec {
    /// `count` consecutive tiles of `frame_width` along the axis by `frame_height` across it.
    FixedGrid {
        frame_width: u32,
        frame_height: u32,
        count: u32,
        axis: Axis,
    },
    /// One frame per opaque region along the axis, spanning the full cross extent.
    AutoDetected { regions: Vec<Region>, axis: Axis },
}

impl SliceSpec {
    /// Validate `params`, then resolve them against `buf`.
    ///
    /// Auto-detect mode runs the region scanner here.
    pub fn resolve(params: &SliceParams, buf: &PixelBuffer) -> FramecutResult<Self> {
        params.validate()?;
        let axis = params.axis;

        if params.auto_detect {
            return Ok(SliceSpec::AutoDetected {
                regions: scan_regions(buf, axis).collect(),
                axis,
            });
        }

        let axis_len = axis.along(buf.width(), buf.height());
        let cross_len = axis.across(buf.width(), buf.height());
        if let Some(frame_width) = params.frame_width {
            return Ok(SliceSpec::FixedGrid {
                frame_width,
                frame_height: params.frame_height.unwrap_or(cross_len),
                count: params.count.unwrap_or(axis_len / frame_width),
                axis,
            });
        }
        let count = params
            .count
            .ok_or_else(|| FramecutError::configuration("slice count must be specified"))?;
        Ok(SliceSpec::FixedGrid {
            frame_width: axis_len / count,
            frame_height: cross_len,
            count,
            axis,
        })
    }

    pub fn axis(&self) -> Axis {
        match self {
            SliceSpec::FixedGrid { axis, .. } | SliceSpec::AutoDetected { axis, .. } => *axis,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slice/spec.rs"]
mod tests;
