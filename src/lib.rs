//! framecut turns sprite sheets and animated GIFs into individual, ready-to-use frames.
//!
//! Two pixel-level cores do the real work:
//!
//! - **Sheet slicing**: [`RegionScanner`] finds contiguous non-transparent spans along one axis,
//!   and [`slice`] cuts either those spans or a fixed grid out of a [`PixelBuffer`], then pads and
//!   resizes each frame.
//! - **Animation compositing**: [`FrameCompositor`] replays stored frame deltas onto a persistent
//!   canvas, applying each frame's [`DisposalMethod`] before the next frame is drawn, and emits
//!   fully resolved frames.
//!
//! Everything around them (reading and writing image files, parsing GIF containers, batching over
//! directories) is thin glue over the `image`, `gif` and `rayon` crates.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: bytes -> [`PixelBuffer`] ([`decode_image`]), or a GIF -> [`AnimationFrame`]s
//!    ([`GifFrameSource`])
//! 2. **Resolve**: [`SliceParams`] -> [`SliceSpec`], or frames -> [`CompositedFrame`]s
//! 3. **Cut**: [`slice`] with [`FrameFinish`] padding and resize
//! 4. **Persist** (optional): push frames into a [`FrameSink`] such as [`DirectorySink`]
//!
//! Both cores are synchronous and single-threaded. Independent sheets or animations can be
//! processed in parallel ([`slice_batch`]); nothing is shared between items.
#![forbid(unsafe_code)]

mod anim;
mod batch;
mod codec;
mod config;
mod foundation;
mod output;
mod pixels;
mod slice;

pub use anim::compositor::{
    Composited, CompositedFrame, CompositorState, FrameCompositor, composite, composite_all,
};
pub use anim::frame::{AnimationFrame, AnimationFrameSource, DisposalMethod, VecFrameSource};
pub use anim::gif_source::GifFrameSource;
pub use batch::{
    AnimationReport, BatchItem, SHEET_EXTENSIONS, SheetReport, collect_inputs,
    extract_gif_frames, resolve_animation, slice_batch, slice_sheet_file,
};
pub use codec::still::{OutputFormat, decode_image, encode_image, read_image};
pub use config::{SliceJob, parse_dimensions, parse_size};
pub use foundation::core::{Axis, BBox, Region, Rgba8, TRANSPARENT};
pub use foundation::error::{FramecutError, FramecutResult};
pub use output::sink::{DirectorySink, FrameSink, InMemorySink, ensure_dir};
pub use pixels::blend::{draw_over, over};
pub use pixels::buffer::PixelBuffer;
pub use pixels::resize::resize_lanczos;
pub use slice::scan::{RegionScanner, is_opaque_line, opaque_lines, scan_regions};
pub use slice::slicer::{FrameFinish, SliceAdvisory, SliceOutput, slice, slice_sheet};
pub use slice::spec::{SliceParams, SliceSpec};
