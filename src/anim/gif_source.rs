use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context as _;

use crate::anim::frame::{AnimationFrame, AnimationFrameSource};
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;

/// Animated-container collaborator: stored GIF frames as positioned RGBA deltas.
///
/// Bounding boxes and disposal methods are passed through exactly as the container stores them;
/// [`crate::FrameCompositor`] decides what they mean.
pub struct GifFrameSource<R: Read> {
    decoder: gif::Decoder<R>,
    width: u32,
    height: u32,
    next_index: u32,
    failed: bool,
}

impl<R: Read> GifFrameSource<R> {
    /// Parse the GIF header from `reader`; frames are read lazily.
    pub fn new(reader: R) -> FramecutResult<Self> {
        let mut opts = gif::DecodeOptions::new();
        opts.set_color_output(gif::ColorOutput::RGBA);
        let decoder = opts.read_info(reader).map_err(map_gif_error)?;
        let width = u32::from(decoder.width());
        let height = u32::from(decoder.height());
        Ok(Self {
            decoder,
            width,
            height,
            next_index: 0,
            failed: false,
        })
    }

    fn read_frame(&mut self) -> FramecutResult<Option<AnimationFrame>> {
        let Some(frame) = self.decoder.read_next_frame().map_err(map_gif_error)? else {
            return Ok(None);
        };
        let index = self.next_index;
        let delta = PixelBuffer::from_raw(
            u32::from(frame.width),
            u32::from(frame.height),
            frame.buffer.to_vec(),
        )
        .map_err(|e| FramecutError::container_corruption(format!("gif frame {index}: {e}")))?;
        let out = AnimationFrame::new(
            index,
            u32::from(frame.left),
            u32::from(frame.top),
            frame.dispose.into(),
            u32::from(frame.delay) * 10,
            delta,
        );
        self.next_index += 1;
        Ok(Some(out))
    }
}

impl GifFrameSource<BufReader<File>> {
    /// Open a GIF file on disk.
    pub fn open(path: &Path) -> FramecutResult<Self> {
        let f = File::open(path).with_context(|| format!("open gif '{}'", path.display()))?;
        Self::new(BufReader::new(f))
    }
}

impl<'a> GifFrameSource<&'a [u8]> {
    /// Read a GIF held in memory.
    pub fn from_bytes(bytes: &'a [u8]) -> FramecutResult<Self> {
        Self::new(bytes)
    }
}

impl<R: Read> Iterator for GifFrameSource<R> {
    type Item = FramecutResult<AnimationFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.read_frame() {
            Ok(frame) => frame.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> AnimationFrameSource for GifFrameSource<R> {
    fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn map_gif_error(err: gif::DecodingError) -> FramecutError {
    match err {
        gif::DecodingError::Io(e) => {
            FramecutError::Other(anyhow::Error::new(e).context("read gif stream"))
        }
        other => FramecutError::container_corruption(other.to_string()),
    }
}
