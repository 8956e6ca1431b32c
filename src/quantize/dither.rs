use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::quantize::palette::Palette;

/// Remap every non-transparent pixel to its nearest palette color, in place,
/// optionally diffusing the quantization error Floyd-Steinberg style.
///
/// Alpha is passed through unchanged and never quantized or dithered. Fully
/// transparent pixels are left untouched and never receive diffused error.
pub fn apply_palette(
    raster: &mut RasterBuffer,
    palette: &Palette,
    dither: bool,
) -> ForgeResult<()> {
    if palette.is_empty() {
        return Err(ForgeError::validation(
            "cannot apply an empty palette",
        ));
    }

    if dither {
        apply_dithered(raster, palette);
    } else {
        apply_flat(raster, palette);
    }
    Ok(())
}

fn apply_flat(raster: &mut RasterBuffer, palette: &Palette) {
    for px in raster.data_mut().chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        let chosen = palette.colors()[palette.nearest_index([px[0], px[1], px[2]])];
        px[0] = chosen[0];
        px[1] = chosen[1];
        px[2] = chosen[2];
    }
}

// Error weights: 7/16 right, 3/16 below-left, 5/16 below, 1/16 below-right.
const FS_OFFSETS: [(i64, i64, f32); 4] = [
    (1, 0, 7.0 / 16.0),
    (-1, 1, 3.0 / 16.0),
    (0, 1, 5.0 / 16.0),
    (1, 1, 1.0 / 16.0),
];

fn apply_dithered(raster: &mut RasterBuffer, palette: &Palette) {
    let w = raster.width() as i64;
    let h = raster.height() as i64;

    // Working channel values with accumulated error, clamped at read time.
    let mut work: Vec<f32> = raster
        .data()
        .chunks_exact(4)
        .flat_map(|px| [f32::from(px[0]), f32::from(px[1]), f32::from(px[2])])
        .collect();

    for y in 0..h {
        for x in 0..w {
            let i = (y * w + x) as usize;
            if raster.data()[i * 4 + 3] == 0 {
                continue;
            }

            let current = [
                work[i * 3].clamp(0.0, 255.0),
                work[i * 3 + 1].clamp(0.0, 255.0),
                work[i * 3 + 2].clamp(0.0, 255.0),
            ];
            let rgb = [
                current[0].round() as u8,
                current[1].round() as u8,
                current[2].round() as u8,
            ];
            let chosen = palette.colors()[palette.nearest_index(rgb)];

            let base = raster.offset(x as u32, y as u32);
            raster.data_mut()[base] = chosen[0];
            raster.data_mut()[base + 1] = chosen[1];
            raster.data_mut()[base + 2] = chosen[2];

            let err = [
                current[0] - f32::from(chosen[0]),
                current[1] - f32::from(chosen[1]),
                current[2] - f32::from(chosen[2]),
            ];

            for (dx, dy, weight) in FS_OFFSETS {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || nx >= w || ny < 0 || ny >= h {
                    continue;
                }
                let n = (ny * w + nx) as usize;
                // Error only flows into non-transparent pixels.
                if raster.data()[n * 4 + 3] == 0 {
                    continue;
                }
                for ch in 0..3 {
                    work[n * 3 + ch] += err[ch] * weight;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/quantize/dither.rs"]
mod tests;
