use crate::foundation::error::{ForgeError, ForgeResult};

/// Alpha level above which a pixel counts as opaque for the emptiness test.
pub const EMPTY_ALPHA_THRESHOLD: u8 = 10;

/// Opaque-pixel fraction below which a buffer is judged empty.
pub const EMPTY_FRACTION: f64 = 0.01;

/// Canonical in-memory image: straight-alpha RGBA8, row-major, tightly packed.
///
/// Invariant: `data.len() == width * height * 4` and both dimensions are
/// non-zero. Alpha 0 means fully transparent, never "absent". Each buffer is
/// owned by the stage that produced it; stages hand buffers downward and only
/// mutate in place where documented (erosion, dithering).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Allocate a fully transparent buffer of the given size.
    pub fn new(width: u32, height: u32) -> ForgeResult<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Wrap raw RGBA8 bytes, validating the length invariant.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> ForgeResult<Self> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(ForgeError::validation(format!(
                "rgba8 buffer length {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel bytes in row-major RGBA8 order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable pixel bytes, for documented in-place filters.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`. Callers must stay in bounds.
    pub fn offset(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }

    /// Read pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Write pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&px);
    }

    /// Whether the buffer is judged empty: the fraction of pixels with alpha
    /// above [`EMPTY_ALPHA_THRESHOLD`] is below [`EMPTY_FRACTION`].
    ///
    /// Used to discard degenerate all-transparent frames (e.g. GIF
    /// leader/trailer frames) that would otherwise pollute the sprite sheet.
    pub fn is_nearly_empty(&self) -> bool {
        let total = (self.width as usize) * (self.height as usize);
        let opaque = self
            .data
            .chunks_exact(4)
            .filter(|px| px[3] > EMPTY_ALPHA_THRESHOLD)
            .count();
        (opaque as f64) / (total as f64) < EMPTY_FRACTION
    }

    /// Copy a rectangular region out into a new buffer.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> ForgeResult<Self> {
        if x.checked_add(width).is_none_or(|r| r > self.width)
            || y.checked_add(height).is_none_or(|b| b > self.height)
        {
            return Err(ForgeError::validation(format!(
                "crop {width}x{height}+{x}+{y} exceeds {}x{}",
                self.width, self.height
            )));
        }
        let mut out = Self::new(width, height)?;
        for row in 0..height {
            let src = self.offset(x, y + row);
            let dst = out.offset(0, row);
            out.data[dst..dst + (width as usize) * 4]
                .copy_from_slice(&self.data[src..src + (width as usize) * 4]);
        }
        Ok(out)
    }

    /// Clear a rectangular region back to fully transparent, in place.
    pub fn clear_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(width).min(self.width);
        let y2 = y.saturating_add(height).min(self.height);
        for row in y1..y2 {
            let start = self.offset(x1, row);
            let end = self.offset(x2, row);
            self.data[start..end].fill(0);
        }
    }
}

fn buffer_len(width: u32, height: u32) -> ForgeResult<usize> {
    if width == 0 || height == 0 {
        return Err(ForgeError::validation(
            "raster dimensions must be non-zero",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| {
            ForgeError::surface(format!("cannot allocate {width}x{height} rgba8 surface"))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
