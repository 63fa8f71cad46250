use image::imageops::{self, FilterType};

use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;

/// Resample `src` to exactly `width x height` with a Lanczos3 filter.
///
/// Colour is filtered premultiplied by alpha, so transparent samples never tint opaque ones.
/// The filter output is clamped to `0..=255` per channel by `image::imageops`.
pub fn resize_lanczos(src: &PixelBuffer, width: u32, height: u32) -> FramecutResult<PixelBuffer> {
    if width == 0 || height == 0 {
        return Err(FramecutError::configuration(format!(
            "resize target must be non-zero, got {width}x{height}"
        )));
    }
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }
    if src.is_empty() {
        return PixelBuffer::transparent(width, height);
    }
    let mut data = src.as_raw().to_vec();
    data.chunks_exact_mut(4).for_each(premultiply);
    let img: image::RgbaImage = PixelBuffer::from_raw(src.width(), src.height(), data)?.try_into()?;

    let mut out = imageops::resize(&img, width, height, FilterType::Lanczos3).into_raw();
    out.chunks_exact_mut(4).for_each(unpremultiply);
    PixelBuffer::from_raw(width, height, out)
}

fn premultiply(px: &mut [u8]) {
    let a = u16::from(px[3]);
    for c in &mut px[..3] {
        *c = ((u16::from(*c) * a + 127) / 255) as u8;
    }
}

fn unpremultiply(px: &mut [u8]) {
    let a = u16::from(px[3]);
    if a == 0 {
        px.fill(0);
        return;
    }
    for c in &mut px[..3] {
        *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/resize.rs"]
mod tests;
