use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::foundation::math::mul_div255_u16;

/// Straight-alpha RGBA8 pixel as a plain array.
pub type StraightRgba8 = [u8; 4];

/// Source-over blend of straight-alpha pixels.
///
/// A fully opaque source pixel replaces the destination outright; a fully
/// transparent one leaves it untouched.
pub fn over(dst: StraightRgba8, src: StraightRgba8) -> StraightRgba8 {
    let sa = u16::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let da = u16::from(dst[3]);
    let inv = 255 - sa;
    // Destination weight after the source covers it.
    let dw = mul_div255_u16(da, inv);
    let oa = sa + dw;
    if oa == 0 {
        return [0, 0, 0, 0];
    }

    let mut out = [0u8; 4];
    out[3] = oa as u8;
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(dw);
        out[i] = ((num + u32::from(oa) / 2) / u32::from(oa)) as u8;
    }
    out
}

/// Source-over blit of `src` onto `dst` at `(left, top)`.
///
/// The source must fit entirely inside the destination; out-of-bounds
/// placement is an error rather than a clip.
pub fn blit_over(dst: &mut RasterBuffer, src: &RasterBuffer, left: u32, top: u32) -> ForgeResult<()> {
    if left.checked_add(src.width()).is_none_or(|r| r > dst.width())
        || top.checked_add(src.height()).is_none_or(|b| b > dst.height())
    {
        return Err(ForgeError::validation(format!(
            "blit {}x{}+{left}+{top} exceeds {}x{} canvas",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }

    for y in 0..src.height() {
        for x in 0..src.width() {
            let blended = over(dst.pixel(left + x, top + y), src.pixel(x, y));
            dst.set_pixel(left + x, top + y, blended);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blend.rs"]
mod tests;
