use std::collections::VecDeque;

use crate::foundation::color::{Lab, delta_e, srgb_to_lab, tolerance_to_delta_e};
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::ForgeResult;

/// Where the background color is read from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundSource {
    /// Majority vote over all four border edges.
    #[default]
    Auto,
    /// Exactly the top-left corner pixel.
    TopLeft,
    /// Exactly the top-right corner pixel.
    TopRight,
    /// Exactly the bottom-left corner pixel.
    BottomLeft,
    /// Exactly the bottom-right corner pixel.
    BottomRight,
}

/// Configuration for background removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemovalOptions {
    /// Background color source.
    pub source: BackgroundSource,
    /// Similarity tolerance in 0..=255, rescaled linearly to delta-E 0..=100.
    pub tolerance: u8,
    /// Binary erosion passes applied to the opaque region after removal.
    pub erode_iterations: u32,
    /// Also clear background-like pixels not connected to the border.
    pub fill_interior: bool,
}

impl Default for RemovalOptions {
    fn default() -> Self {
        Self {
            source: BackgroundSource::Auto,
            tolerance: 10,
            erode_iterations: 0,
            fill_interior: false,
        }
    }
}

/// Detect the background color of `raster` per `source`.
///
/// Corner sources read exactly that corner pixel's RGB. `Auto` buckets every
/// border pixel by exact RGB tuple and picks the most frequent one, breaking
/// ties by first-seen order during the top/bottom-then-left/right scan.
pub fn detect_background(raster: &RasterBuffer, source: BackgroundSource) -> [u8; 3] {
    let w = raster.width();
    let h = raster.height();
    match source {
        BackgroundSource::TopLeft => rgb_at(raster, 0, 0),
        BackgroundSource::TopRight => rgb_at(raster, w - 1, 0),
        BackgroundSource::BottomLeft => rgb_at(raster, 0, h - 1),
        BackgroundSource::BottomRight => rgb_at(raster, w - 1, h - 1),
        BackgroundSource::Auto => {
            let mut counts: Vec<([u8; 3], u32)> = Vec::new();
            let bump = |rgb: [u8; 3], counts: &mut Vec<([u8; 3], u32)>| {
                match counts.iter_mut().find(|(c, _)| *c == rgb) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((rgb, 1)),
                }
            };
            for x in 0..w {
                bump(rgb_at(raster, x, 0), &mut counts);
                bump(rgb_at(raster, x, h - 1), &mut counts);
            }
            for y in 0..h {
                bump(rgb_at(raster, 0, y), &mut counts);
                bump(rgb_at(raster, w - 1, y), &mut counts);
            }
            // First-seen entry wins ties because later entries must be
            // strictly greater to replace it.
            let mut best = ([0, 0, 0], 0u32);
            for &(rgb, n) in &counts {
                if n > best.1 {
                    best = (rgb, n);
                }
            }
            best.0
        }
    }
}

/// Remove border-connected background from `raster`, returning a new buffer.
///
/// A multi-source flood fill is seeded from every border pixel. Visited
/// background-like pixels (delta-E to the detected color within the rescaled
/// tolerance) have their alpha cleared, keeping RGB intact; the fill only
/// propagates through background-like pixels (4-connectivity), so enclosed
/// regions of the background color survive unless `fill_interior` is set.
/// Pixels never visited keep their original color and alpha.
pub fn remove_background(
    raster: &RasterBuffer,
    opts: &RemovalOptions,
) -> ForgeResult<RasterBuffer> {
    let w = raster.width();
    let h = raster.height();
    let bg = srgb_to_lab(detect_background(raster, opts.source));
    let max_de = tolerance_to_delta_e(opts.tolerance);

    let mut out = raster.clone();
    let mut visited = vec![false; (w as usize) * (h as usize)];
    let mut queue = VecDeque::new();

    for x in 0..w {
        queue.push_back((x, 0));
        queue.push_back((x, h - 1));
    }
    for y in 0..h {
        queue.push_back((0, y));
        queue.push_back((w - 1, y));
    }

    while let Some((x, y)) = queue.pop_front() {
        let key = (y as usize) * (w as usize) + (x as usize);
        if visited[key] {
            continue;
        }
        visited[key] = true;

        if !is_background_like(raster, x, y, bg, max_de) {
            continue;
        }

        let mut px = out.pixel(x, y);
        px[3] = 0;
        out.set_pixel(x, y, px);

        if x > 0 {
            queue.push_back((x - 1, y));
        }
        if x + 1 < w {
            queue.push_back((x + 1, y));
        }
        if y > 0 {
            queue.push_back((x, y - 1));
        }
        if y + 1 < h {
            queue.push_back((x, y + 1));
        }
    }

    if opts.fill_interior {
        for y in 0..h {
            for x in 0..w {
                if is_background_like(raster, x, y, bg, max_de) {
                    let mut px = out.pixel(x, y);
                    px[3] = 0;
                    out.set_pixel(x, y, px);
                }
            }
        }
    }

    if opts.erode_iterations > 0 {
        erode_alpha_in_place(&mut out, opts.erode_iterations);
    }

    Ok(out)
}

/// Binary erosion of the alpha channel, in place.
///
/// Each pass clears any currently-opaque pixel that has at least one
/// transparent 8-neighbor, treating out-of-bounds as transparent. Runs for a
/// fixed `iterations` count, not until convergence. Iteration bounds are the
/// caller's responsibility; the configuration boundary caps them.
pub fn erode_alpha_in_place(raster: &mut RasterBuffer, iterations: u32) {
    let w = raster.width() as i64;
    let h = raster.height() as i64;

    for _ in 0..iterations {
        let opaque: Vec<bool> = raster
            .data()
            .chunks_exact(4)
            .map(|px| px[3] != 0)
            .collect();
        let was_opaque = |x: i64, y: i64| -> bool {
            x >= 0 && x < w && y >= 0 && y < h && opaque[(y * w + x) as usize]
        };

        let mut changed = false;
        for y in 0..h {
            for x in 0..w {
                if !opaque[(y * w + x) as usize] {
                    continue;
                }
                let mut boundary = false;
                for dy in -1..=1i64 {
                    for dx in -1..=1i64 {
                        if (dx != 0 || dy != 0) && !was_opaque(x + dx, y + dy) {
                            boundary = true;
                        }
                    }
                }
                if boundary {
                    let mut px = raster.pixel(x as u32, y as u32);
                    px[3] = 0;
                    raster.set_pixel(x as u32, y as u32, px);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
}

fn rgb_at(raster: &RasterBuffer, x: u32, y: u32) -> [u8; 3] {
    let px = raster.pixel(x, y);
    [px[0], px[1], px[2]]
}

fn is_background_like(raster: &RasterBuffer, x: u32, y: u32, bg: Lab, max_de: f32) -> bool {
    delta_e(srgb_to_lab(rgb_at(raster, x, y)), bg) <= max_de
}

#[cfg(test)]
#[path = "../../tests/unit/filters/background.rs"]
mod tests;
