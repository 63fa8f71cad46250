use crate::foundation::core::BBox;
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;

/// What happens to the canvas area of a frame before the next frame is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum DisposalMethod {
    /// No disposal specified; treated as [`DisposalMethod::DoNotDispose`].
    #[default]
    Unspecified,
    /// Leave the frame in place as background for the next one.
    DoNotDispose,
    /// Clear the frame's bounding box to fully transparent.
    RestoreToBackground,
    /// Roll the canvas back to how it was before the frame was drawn.
    RestoreToPrevious,
}

impl DisposalMethod {
    /// Decode the raw 3-bit disposal field of a GIF graphic control extension.
    ///
    /// Codes 4..=7 are reserved and treated as container corruption.
    pub fn from_code(code: u8) -> FramecutResult<Self> {
        match code {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::DoNotDispose),
            2 => Ok(Self::RestoreToBackground),
            3 => Ok(Self::RestoreToPrevious),
            other => Err(FramecutError::container_corruption(format!(
                "unrecognized disposal method {other}"
            ))),
        }
    }
}

impl From<gif::DisposalMethod> for DisposalMethod {
    fn from(value: gif::DisposalMethod) -> Self {
        match value {
            gif::DisposalMethod::Any => Self::Unspecified,
            gif::DisposalMethod::Keep => Self::DoNotDispose,
            gif::DisposalMethod::Background => Self::RestoreToBackground,
            gif::DisposalMethod::Previous => Self::RestoreToPrevious,
        }
    }
}

/// One stored animation frame: a delta positioned at `bbox` on the shared canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    pub index: u32,
    pub bbox: BBox,
    pub disposal: DisposalMethod,
    pub duration_ms: u32,
    /// `bbox.width x bbox.height` samples.
    pub delta: PixelBuffer,
}

impl AnimationFrame {
    /// Build a frame whose bounding box is derived from the delta size and `(x, y)`.
    pub fn new(
        index: u32,
        x: u32,
        y: u32,
        disposal: DisposalMethod,
        duration_ms: u32,
        delta: PixelBuffer,
    ) -> Self {
        Self {
            index,
            bbox: BBox::new(x, y, delta.width(), delta.height()),
            disposal,
            duration_ms,
            delta,
        }
    }
}

/// Forward-only producer of [`AnimationFrame`]s in increasing `index` order.
///
/// Implementations report container parse failures as items; the stream ends at `None`.
pub trait AnimationFrameSource: Iterator<Item = FramecutResult<AnimationFrame>> {
    /// Full canvas `(width, height)` declared by the container.
    fn canvas_size(&self) -> (u32, u32);
}

/// In-memory frame list, mostly for tests and callers that already hold decoded deltas.
#[derive(Clone, Debug)]
pub struct VecFrameSource {
    canvas: (u32, u32),
    frames: std::vec::IntoIter<AnimationFrame>,
}

impl VecFrameSource {
    pub fn new(width: u32, height: u32, frames: Vec<AnimationFrame>) -> Self {
        Self {
            canvas: (width, height),
            frames: frames.into_iter(),
        }
    }
}

impl Iterator for VecFrameSource {
    type Item = FramecutResult<AnimationFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.next().map(Ok)
    }
}

impl AnimationFrameSource for VecFrameSource {
    fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }
}
