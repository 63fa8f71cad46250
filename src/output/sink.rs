use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::codec::still::{OutputFormat, encode_image};
use crate::foundation::error::FramecutResult;
use crate::pixels::buffer::PixelBuffer;

/// Sink contract for consuming produced frames in order.
///
/// Ordering contract: `push_frame` is called with strictly increasing `idx`, starting at 0.
pub trait FrameSink {
    /// Push one frame.
    fn push_frame(&mut self, idx: usize, frame: &PixelBuffer) -> FramecutResult<()>;
    /// Called once after the last frame; returns how many frames were accepted.
    fn end(&mut self) -> FramecutResult<usize>;
}

/// In-memory sink for tests and in-process consumers.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) frames: Vec<PixelBuffer>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[PixelBuffer] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<PixelBuffer> {
        self.frames
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(&mut self, _idx: usize, frame: &PixelBuffer) -> FramecutResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> FramecutResult<usize> {
        Ok(self.frames.len())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Naming {
    /// `<stem>_<n>.<ext>`, `n` 1-based.
    Sprite { stem: String },
    /// `frame_<iiii>.<ext>`, 0-based.
    Animation,
}

/// Encodes each frame and writes it into one directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    naming: Naming,
    format: OutputFormat,
    quality: u8,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Frames of sheet `stem` go to `<base>/<stem>/<stem>_<n>.<ext>`, with `stem` lowercased.
    pub fn sprite_frames(base: &Path, stem: &str, format: OutputFormat, quality: u8) -> Self {
        let stem = stem.to_lowercase();
        Self {
            dir: base.join(&stem),
            naming: Naming::Sprite { stem },
            format,
            quality,
            written: Vec::new(),
        }
    }

    /// Animation frames go to `<dir>/frame_<iiii>.<ext>`.
    pub fn animation_frames(dir: &Path, format: OutputFormat, quality: u8) -> Self {
        Self {
            dir: dir.to_path_buf(),
            naming: Naming::Animation,
            format,
            quality,
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// File name used for frame `idx`.
    pub fn file_name(&self, idx: usize) -> String {
        let ext = self.format.extension();
        match &self.naming {
            Naming::Sprite { stem } => format!("{stem}_{}.{ext}", idx + 1),
            Naming::Animation => format!("frame_{idx:04}.{ext}"),
        }
    }
}

impl FrameSink for DirectorySink {
    fn push_frame(&mut self, idx: usize, frame: &PixelBuffer) -> FramecutResult<()> {
        if self.written.is_empty() {
            ensure_dir(&self.dir)?;
        }
        let path = self.dir.join(self.file_name(idx));
        let bytes = encode_image(frame, self.format, self.quality)?;
        std::fs::write(&path, bytes).with_context(|| format!("write frame '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> FramecutResult<usize> {
        Ok(self.written.len())
    }
}

/// Create `dir` and its parents if missing.
pub fn ensure_dir(dir: &Path) -> FramecutResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/output/sink.rs"]
mod tests;
