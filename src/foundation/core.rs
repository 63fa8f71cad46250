use crate::foundation::error::{FramecutError, FramecutResult};

/// Straight (non-premultiplied) RGBA8 sample.
pub type Rgba8 = [u8; 4];

/// Fully transparent sample used for padding and cleared canvas areas.
pub const TRANSPARENT: Rgba8 = [0, 0, 0, 0];

/// Direction a sheet is scanned and sliced along.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Axis {
    /// Frames laid out left to right; regions are column spans.
    #[default]
    #[serde(rename = "h", alias = "horizontal")]
    Horizontal,
    /// Frames laid out top to bottom; regions are row spans.
    #[serde(rename = "v", alias = "vertical")]
    Vertical,
}

impl Axis {
    /// Length of `(width, height)` along this axis.
    pub fn along(self, width: u32, height: u32) -> u32 {
        match self {
            Axis::Horizontal => width,
            Axis::Vertical => height,
        }
    }

    /// Length of `(width, height)` across this axis.
    pub fn across(self, width: u32, height: u32) -> u32 {
        match self {
            Axis::Horizontal => height,
            Axis::Vertical => width,
        }
    }
}

/// Closed interval `[start, end]` along a scan axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Region {
    pub start: u32,
    pub end: u32, // inclusive
}

impl Region {
    pub fn new(start: u32, end: u32) -> FramecutResult<Self> {
        if start > end {
            return Err(FramecutError::configuration("Region start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn extent(self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(self, idx: u32) -> bool {
        self.start <= idx && idx <= self.end
    }
}

/// Axis-aligned rectangle in pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct BBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl BBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `true` when the rectangle lies entirely inside a `width x height` surface.
    pub fn fits_within(self, width: u32, height: u32) -> bool {
        let right = u64::from(self.x) + u64::from(self.width);
        let bottom = u64::from(self.y) + u64::from(self.height);
        right <= u64::from(width) && bottom <= u64::from(height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
