use crate::foundation::core::{BBox, Rgba8, TRANSPARENT};
use crate::foundation::error::{FramecutError, FramecutResult};

const BYTES_PER_PIXEL: usize = 4;

/// Row-major grid of straight RGBA8 samples.
///
/// Invariant: `data.len() == width * height * 4`. The alpha channel (`data[i * 4 + 3]`) is the
/// only signal the region scanner reads.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl PixelBuffer {
    /// Wrap tightly packed RGBA8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> FramecutResult<Self> {
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(FramecutError::configuration(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Allocate a fully transparent buffer.
    pub fn transparent(width: u32, height: u32) -> FramecutResult<Self> {
        Self::filled(width, height, TRANSPARENT)
    }

    /// Allocate a buffer where every sample equals `px`.
    pub fn filled(width: u32, height: u32, px: Rgba8) -> FramecutResult<Self> {
        let len = byte_len(width, height)?;
        let data = px.repeat(len / BYTES_PER_PIXEL);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Sample at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let idx = self.offset(x, y)?;
        let px = &self.data[idx..idx + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Alpha at `(x, y)`; the caller guarantees the coordinate is in bounds.
    pub(crate) fn alpha_unchecked(&self, x: u32, y: u32) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.data[idx + 3]
    }

    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        let idx = self.offset(x, y)?;
        Some(&mut self.data[idx..idx + BYTES_PER_PIXEL])
    }

    /// Bytes of row `y`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Copy the `rect` area out into a new buffer. `rect` must lie inside this buffer.
    pub fn crop(&self, rect: BBox) -> FramecutResult<Self> {
        if !rect.fits_within(self.width, self.height) {
            return Err(FramecutError::configuration(format!(
                "crop {rect:?} exceeds {}x{} buffer",
                self.width, self.height
            )));
        }
        let mut out = Vec::with_capacity(byte_len(rect.width, rect.height)?);
        let stride = self.stride();
        let x0 = rect.x as usize * BYTES_PER_PIXEL;
        let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
        for y in rect.y..rect.y + rect.height {
            let start = y as usize * stride + x0;
            out.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Self::from_raw(rect.width, rect.height, out)
    }

    /// New buffer grown by `padding` fully transparent samples on every side.
    pub fn padded(&self, padding: u32) -> FramecutResult<Self> {
        if padding == 0 {
            return Ok(self.clone());
        }
        let grow = |v: u32| {
            padding
                .checked_mul(2)
                .and_then(|p2| v.checked_add(p2))
                .ok_or_else(|| FramecutError::configuration("padding overflows frame size"))
        };
        let mut out = Self::transparent(grow(self.width)?, grow(self.height)?)?;
        out.copy_from(self, padding, padding)?;
        Ok(out)
    }

    /// Overwrite the area at `(x, y)` with `src`, sample for sample (no blending).
    pub(crate) fn copy_from(&mut self, src: &PixelBuffer, x: u32, y: u32) -> FramecutResult<()> {
        let rect = BBox::new(x, y, src.width, src.height);
        if !rect.fits_within(self.width, self.height) {
            return Err(FramecutError::configuration(format!(
                "copy of {}x{} at ({x}, {y}) exceeds {}x{} buffer",
                src.width, src.height, self.width, self.height
            )));
        }
        let stride = self.stride();
        let row_bytes = src.stride();
        for sy in 0..src.height {
            let dst_start = (y + sy) as usize * stride + x as usize * BYTES_PER_PIXEL;
            let src_start = sy as usize * row_bytes;
            self.data[dst_start..dst_start + row_bytes]
                .copy_from_slice(&src.data[src_start..src_start + row_bytes]);
        }
        Ok(())
    }

    /// Reset the `rect` area to fully transparent. `rect` must lie inside this buffer.
    pub(crate) fn clear_rect(&mut self, rect: BBox) -> FramecutResult<()> {
        if !rect.fits_within(self.width, self.height) {
            return Err(FramecutError::container_corruption(format!(
                "clear {rect:?} exceeds {}x{} canvas",
                self.width, self.height
            )));
        }
        let stride = self.stride();
        let row_bytes = rect.width as usize * BYTES_PER_PIXEL;
        for y in rect.y..rect.y + rect.height {
            let start = y as usize * stride + rect.x as usize * BYTES_PER_PIXEL;
            self.data[start..start + row_bytes].fill(0);
        }
        Ok(())
    }

    fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }
}

impl From<image::RgbaImage> for PixelBuffer {
    fn from(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

impl TryFrom<PixelBuffer> for image::RgbaImage {
    type Error = FramecutError;

    fn try_from(buf: PixelBuffer) -> FramecutResult<Self> {
        let (width, height) = buf.dimensions();
        image::RgbaImage::from_raw(width, height, buf.data)
            .ok_or_else(|| FramecutError::codec("pixel buffer does not match image dimensions"))
    }
}

fn byte_len(width: u32, height: u32) -> FramecutResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| FramecutError::configuration("pixel buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/buffer.rs"]
mod tests;
