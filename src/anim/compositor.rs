use crate::anim::frame::{AnimationFrame, AnimationFrameSource, DisposalMethod};
use crate::foundation::core::BBox;
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::blend::draw_over;
use crate::pixels::buffer::PixelBuffer;

/// Fully resolved frame, decoupled from the compositor's canvas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositedFrame {
    pub index: u32,
    pub duration_ms: u32,
    pub buffer: PixelBuffer,
}

/// Where the compositor is in its decode session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompositorState {
    /// Canvas freshly allocated and fully transparent.
    Empty,
    /// Canvas holds the visible result of frame `index`.
    Composited { index: u32 },
}

#[derive(Debug)]
struct Canvas {
    buffer: PixelBuffer,
    last_frame: Option<(BBox, DisposalMethod)>,
    pre_restore_snapshot: Option<PixelBuffer>,
}

/// Accumulates animation deltas onto a persistent canvas, applying disposal rules.
///
/// One compositor serves one decode session. Frames must arrive in increasing `index` order
/// starting at 0. The first container-corruption error poisons the compositor: every later call
/// fails and no canvas state is handed out.
#[derive(Debug)]
pub struct FrameCompositor {
    canvas: Canvas,
    state: CompositorState,
    poisoned: bool,
}

impl FrameCompositor {
    /// Allocate a fully transparent `width x height` canvas.
    pub fn new(width: u32, height: u32) -> FramecutResult<Self> {
        Ok(Self {
            canvas: Canvas {
                buffer: PixelBuffer::transparent(width, height)?,
                last_frame: None,
                pre_restore_snapshot: None,
            },
            state: CompositorState::Empty,
            poisoned: false,
        })
    }

    pub fn state(&self) -> CompositorState {
        self.state
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas.buffer.dimensions()
    }

    /// Apply one frame and return the resolved, full-canvas result for it.
    #[tracing::instrument(
        skip(self, frame),
        fields(index = frame.index, disposal = ?frame.disposal)
    )]
    pub fn compose(&mut self, frame: AnimationFrame) -> FramecutResult<CompositedFrame> {
        if self.poisoned {
            return Err(FramecutError::container_corruption(
                "compositor already failed for this decode session",
            ));
        }
        if let Err(e) = self.check(&frame) {
            self.poisoned = true;
            return Err(e);
        }

        if self.state != CompositorState::Empty {
            self.dispose_previous()?;
        }

        if frame.disposal == DisposalMethod::RestoreToPrevious {
            tracing::debug!("snapshot canvas before drawing");
            self.canvas.pre_restore_snapshot = Some(self.canvas.buffer.clone());
        }

        if let Err(e) = draw_over(
            &mut self.canvas.buffer,
            &frame.delta,
            frame.bbox.x,
            frame.bbox.y,
        ) {
            self.poisoned = true;
            return Err(e);
        }

        self.canvas.last_frame = Some((frame.bbox, frame.disposal));
        self.state = CompositorState::Composited { index: frame.index };

        Ok(CompositedFrame {
            index: frame.index,
            duration_ms: frame.duration_ms,
            buffer: self.canvas.buffer.clone(),
        })
    }

    fn check(&self, frame: &AnimationFrame) -> FramecutResult<()> {
        let expected = match self.state {
            CompositorState::Empty => 0,
            CompositorState::Composited { index } => index.saturating_add(1),
        };
        if frame.index != expected {
            return Err(FramecutError::container_corruption(format!(
                "frame {} delivered out of order, expected {expected}",
                frame.index
            )));
        }
        let (w, h) = self.canvas_size();
        if !frame.bbox.fits_within(w, h) {
            return Err(FramecutError::container_corruption(format!(
                "frame {} bbox {:?} exceeds {w}x{h} canvas",
                frame.index, frame.bbox
            )));
        }
        if frame.delta.dimensions() != (frame.bbox.width, frame.bbox.height) {
            return Err(FramecutError::container_corruption(format!(
                "frame {} delta is {}x{} but bbox is {}x{}",
                frame.index,
                frame.delta.width(),
                frame.delta.height(),
                frame.bbox.width,
                frame.bbox.height
            )));
        }
        Ok(())
    }

    fn dispose_previous(&mut self) -> FramecutResult<()> {
        let Some((bbox, disposal)) = self.canvas.last_frame else {
            return Ok(());
        };
        match disposal {
            DisposalMethod::Unspecified | DisposalMethod::DoNotDispose => {}
            DisposalMethod::RestoreToBackground => {
                tracing::debug!(?bbox, "clear previous frame area");
                if let Err(e) = self.canvas.buffer.clear_rect(bbox) {
                    self.poisoned = true;
                    return Err(e);
                }
            }
            DisposalMethod::RestoreToPrevious => match self.canvas.pre_restore_snapshot.take() {
                Some(snapshot) => {
                    tracing::debug!("restore canvas snapshot");
                    self.canvas.buffer = snapshot;
                }
                // Assumed no-op; see DESIGN.md.
                None => tracing::debug!("no snapshot to restore"),
            },
        }
        Ok(())
    }
}

/// Iterator adapter compositing every frame of a source in order.
///
/// Yields the first error and then ends.
pub struct Composited<S> {
    source: S,
    compositor: FrameCompositor,
    done: bool,
}

impl<S> Iterator for Composited<S>
where
    S: AnimationFrameSource,
{
    type Item = FramecutResult<CompositedFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = match self.source.next()? {
            Ok(frame) => self.compositor.compose(frame),
            Err(e) => Err(e),
        };
        if item.is_err() {
            self.done = true;
        }
        Some(item)
    }
}

/// Start compositing `source` frame by frame.
pub fn composite<S>(source: S) -> FramecutResult<Composited<S>>
where
    S: AnimationFrameSource,
{
    let (w, h) = source.canvas_size();
    Ok(Composited {
        compositor: FrameCompositor::new(w, h)?,
        source,
        done: false,
    })
}

/// Drive `source` to exhaustion, returning every resolved frame or the first error.
pub fn composite_all<S>(source: S) -> FramecutResult<Vec<CompositedFrame>>
where
    S: AnimationFrameSource,
{
    composite(source)?.collect()
}

#[cfg(test)]
#[path = "../../tests/unit/anim/compositor.rs"]
mod tests;
