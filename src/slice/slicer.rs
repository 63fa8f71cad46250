use crate::foundation::core::{Axis, BBox};
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;
use crate::pixels::resize::resize_lanczos;
use crate::slice::spec::{SliceParams, SliceSpec};

/// Why a slicing call produced no frames. Never an error: callers warn and move on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum SliceAdvisory {
    /// Auto-detect found no opaque content on the sheet.
    NoRegionsDetected,
    /// The fixed grid did not fit a single non-empty tile.
    NoTilesFit,
}

impl std::fmt::Display for SliceAdvisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceAdvisory::NoRegionsDetected => f.write_str("no non-transparent regions detected"),
            SliceAdvisory::NoTilesFit => f.write_str("no tiles fit the sheet"),
        }
    }
}

/// Post-processing applied to every cut frame: padding first, then resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameFinish {
    pub padding: u32,
    pub resize: Option<(u32, u32)>,
}

impl FrameFinish {
    pub fn validate(&self) -> FramecutResult<()> {
        if let Some((w, h)) = self.resize
            && (w == 0 || h == 0)
        {
            return Err(FramecutError::configuration(format!(
                "resize target must be non-zero, got {w}x{h}"
            )));
        }
        Ok(())
    }

    fn apply(&self, frame: PixelBuffer) -> FramecutResult<PixelBuffer> {
        let frame = if self.padding > 0 {
            frame.padded(self.padding)?
        } else {
            frame
        };
        match self.resize {
            Some((w, h)) => resize_lanczos(&frame, w, h),
            None => Ok(frame),
        }
    }
}

/// Ordered frames cut from one sheet.
#[derive(Clone, Debug, Default)]
pub struct SliceOutput {
    /// Frames in axis order (left to right, or top to bottom).
    pub frames: Vec<PixelBuffer>,
    /// Set when `frames` is empty.
    pub advisory: Option<SliceAdvisory>,
}

impl SliceOutput {
    pub fn count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Cut `buf` into frames according to `spec`, then finish each frame.
#[tracing::instrument(skip(buf, spec), fields(width = buf.width(), height = buf.height()))]
pub fn slice(
    buf: &PixelBuffer,
    spec: &SliceSpec,
    finish: FrameFinish,
) -> FramecutResult<SliceOutput> {
    finish.validate()?;
    cut(buf, spec, finish)
}

/// Validate `params`, resolve them against `buf`, and slice.
///
/// Both checks run before the sheet is scanned.
pub fn slice_sheet(
    buf: &PixelBuffer,
    params: &SliceParams,
    finish: FrameFinish,
) -> FramecutResult<SliceOutput> {
    finish.validate()?;
    let spec = SliceSpec::resolve(params, buf)?;
    cut(buf, &spec, finish)
}

fn cut(buf: &PixelBuffer, spec: &SliceSpec, finish: FrameFinish) -> FramecutResult<SliceOutput> {
    let rects = match spec {
        SliceSpec::FixedGrid {
            frame_width,
            frame_height,
            count,
            axis,
        } => grid_rects(buf, *frame_width, *frame_height, *count, *axis),
        SliceSpec::AutoDetected { regions, axis } => regions
            .iter()
            .map(|r| span_rect(buf, *axis, r.start, r.extent()))
            .filter(|rect| !rect.is_empty())
            .collect(),
    };

    if rects.is_empty() {
        let advisory = match spec {
            SliceSpec::FixedGrid { .. } => SliceAdvisory::NoTilesFit,
            SliceSpec::AutoDetected { .. } => SliceAdvisory::NoRegionsDetected,
        };
        tracing::warn!(%advisory, "sheet produced no frames");
        return Ok(SliceOutput {
            frames: Vec::new(),
            advisory: Some(advisory),
        });
    }

    let mut frames = Vec::with_capacity(rects.len());
    for rect in rects {
        frames.push(finish.apply(buf.crop(rect)?)?);
    }
    tracing::debug!(frames = frames.len(), "sliced sheet");
    Ok(SliceOutput {
        frames,
        advisory: None,
    })
}

fn grid_rects(
    buf: &PixelBuffer,
    frame_width: u32,
    frame_height: u32,
    count: u32,
    axis: Axis,
) -> Vec<BBox> {
    let axis_len = axis.along(buf.width(), buf.height());
    let cross = frame_height.min(axis.across(buf.width(), buf.height()));
    if frame_width == 0 || cross == 0 {
        return Vec::new();
    }

    let mut rects = Vec::new();
    for i in 0..count {
        let start = u64::from(i) * u64::from(frame_width);
        if start >= u64::from(axis_len) {
            break;
        }
        let end = (start + u64::from(frame_width)).min(u64::from(axis_len));
        let start = start as u32;
        let extent = end as u32 - start;
        let rect = match axis {
            Axis::Horizontal => BBox::new(start, 0, extent, cross),
            Axis::Vertical => BBox::new(0, start, cross, extent),
        };
        if !rect.is_empty() {
            rects.push(rect);
        }
    }
    rects
}

fn span_rect(buf: &PixelBuffer, axis: Axis, start: u32, extent: u32) -> BBox {
    match axis {
        Axis::Horizontal => BBox::new(start, 0, extent, buf.height()),
        Axis::Vertical => BBox::new(0, start, buf.width(), extent),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slice/slicer.rs"]
mod tests;
