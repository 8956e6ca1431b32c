use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Resize `src` to exactly `target_width x target_height` with
/// nearest-neighbor sampling, preserving the source aspect ratio by
/// letterboxing.
///
/// The relatively larger source axis fills its target axis exactly; the other
/// is scaled proportionally (rounded) and centered, leaving transparent
/// padding bands. Every destination pixel maps to exactly one source pixel;
/// values are never averaged.
///
/// Zero target dimensions are rejected here, though the configuration
/// boundary already enforces a larger minimum.
pub fn scale_nearest(
    src: &RasterBuffer,
    target_width: u32,
    target_height: u32,
) -> ForgeResult<RasterBuffer> {
    if target_width == 0 || target_height == 0 {
        return Err(ForgeError::validation(
            "scale target dimensions must be non-zero",
        ));
    }

    let sw = u64::from(src.width());
    let sh = u64::from(src.height());
    let tw = u64::from(target_width);
    let th = u64::from(target_height);

    // Cross-multiplied aspect comparison keeps this exact.
    let (draw_w, draw_h) = if sw * th > sh * tw {
        // Source relatively wider: fit width, scale height.
        (target_width, round_div(tw * sh, sw) as u32)
    } else if sw * th < sh * tw {
        // Source relatively narrower: fit height, scale width.
        (round_div(th * sw, sh) as u32, target_height)
    } else {
        (target_width, target_height)
    };

    let offset_x = (target_width - draw_w) / 2;
    let offset_y = (target_height - draw_h) / 2;

    let mut out = RasterBuffer::new(target_width, target_height)?;
    for dy in 0..draw_h {
        let sy = (u64::from(dy) * sh / u64::from(draw_h)) as u32;
        for dx in 0..draw_w {
            let sx = (u64::from(dx) * sw / u64::from(draw_w)) as u32;
            out.set_pixel(offset_x + dx, offset_y + dy, src.pixel(sx, sy));
        }
    }
    Ok(out)
}

fn round_div(num: u64, den: u64) -> u64 {
    (num + den / 2) / den
}

#[cfg(test)]
#[path = "../../tests/unit/scale/nearest.rs"]
mod tests;
