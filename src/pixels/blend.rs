use crate::foundation::core::{BBox, Rgba8};
use crate::foundation::error::{FramecutError, FramecutResult};
use crate::pixels::buffer::PixelBuffer;

/// Straight-alpha source-over: `src` drawn on top of `dst`.
///
/// Opaque sources replace `dst`, fully transparent sources leave it untouched.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let sa = u32::from(src[3]);
    let inv = 255 - sa;
    // Alpha in 255^2 units.
    let out_a = sa * 255 + u32::from(dst[3]) * inv;
    if out_a == 0 {
        return [0, 0, 0, 0];
    }
    let dw = u32::from(dst[3]) * inv;

    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * sa * 255 + u32::from(dst[i]) * dw;
        out[i] = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = ((out_a + 127) / 255).min(255) as u8;
    out
}

/// Blend `src` over `dst` with its top-left corner at `(x, y)`.
///
/// The whole of `src` must land inside `dst`; anything else is container corruption.
pub fn draw_over(dst: &mut PixelBuffer, src: &PixelBuffer, x: u32, y: u32) -> FramecutResult<()> {
    let rect = BBox::new(x, y, src.width(), src.height());
    if !rect.fits_within(dst.width(), dst.height()) {
        return Err(FramecutError::container_corruption(format!(
            "delta {}x{} at ({x}, {y}) exceeds {}x{} canvas",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    for sy in 0..src.height() {
        for sx in 0..src.width() {
            let Some(s) = src.pixel(sx, sy) else {
                continue;
            };
            if s[3] == 0 {
                continue;
            }
            if let Some(d) = dst.pixel_mut(x + sx, y + sy) {
                let out = over([d[0], d[1], d[2], d[3]], s);
                d.copy_from_slice(&out);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/blend.rs"]
mod tests;
