use anyhow::Context;
use image::{ExtendedColorType, ImageEncoder};

use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;

/// Still-image formats frames can be written in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    /// Lossless WebP.
    Webp,
    Gif,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
            OutputFormat::Gif => "gif",
        }
    }
}

/// Decode encoded image bytes into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> FramecutResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| FramecutError::codec(format!("decode image from memory: {e}")))?;
    Ok(PixelBuffer::from(dyn_img.to_rgba8()))
}

/// Encode `buf` as `format`.
///
/// `quality` (1..=100) steers the GIF quantizer; PNG and WebP are lossless.
pub fn encode_image(
    buf: &PixelBuffer,
    format: OutputFormat,
    quality: u8,
) -> FramecutResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(FramecutError::configuration(format!(
            "quality must be in 1..=100, got {quality}"
        )));
    }
    let (w, h) = buf.dimensions();
    let mut out = Vec::new();
    let res = match format {
        OutputFormat::Png => image::codecs::png::PngEncoder::new(&mut out).write_image(
            buf.as_raw(),
            w,
            h,
            ExtendedColorType::Rgba8,
        ),
        OutputFormat::Webp => image::codecs::webp::WebPEncoder::new_lossless(&mut out)
            .write_image(buf.as_raw(), w, h, ExtendedColorType::Rgba8),
        OutputFormat::Gif => {
            let mut enc = image::codecs::gif::GifEncoder::new_with_speed(
                &mut out,
                gif_speed_for_quality(quality),
            );
            enc.encode(buf.as_raw(), w, h, ExtendedColorType::Rgba8)
        }
    };
    res.map_err(|e| FramecutError::codec(format!("encode {}: {e}", format.extension())))?;
    Ok(out)
}

/// Decode an image file from disk.
pub fn read_image(path: &std::path::Path) -> FramecutResult<PixelBuffer> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

/// Quality 100 maps to the slowest, best quantizer speed (1); quality 1 to the fastest (30).
fn gif_speed_for_quality(quality: u8) -> i32 {
    let q = i32::from(quality.clamp(1, 100));
    30 - (q - 1) * 29 / 99
}

#[cfg(test)]
#[path = "../../tests/unit/codec/still.rs"]
mod tests;
