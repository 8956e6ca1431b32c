use crate::foundation::error::{ForgeError, ForgeResult};
use crate::foundation::math::ceil_sqrt;

/// Grid layout for a packed sprite sheet.
///
/// This type is the single source of cell geometry: packing and playback
/// indexing must both go through it, so a sheet is always read back with the
/// same layout it was written with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetLayout {
    /// Column count.
    pub cols: u32,
    /// Row count.
    pub rows: u32,
}

impl SheetLayout {
    /// Compute the layout for `frame_count` frames.
    ///
    /// A positive `output_cols` is used directly; zero means auto, which picks
    /// `ceil(sqrt(frame_count))` columns. Rows are `ceil(frame_count / cols)`
    /// either way.
    pub fn for_frames(frame_count: usize, output_cols: u32) -> ForgeResult<Self> {
        if frame_count == 0 {
            return Err(ForgeError::validation(
                "sheet layout requires at least one frame",
            ));
        }
        let cols = if output_cols > 0 {
            output_cols
        } else {
            ceil_sqrt(frame_count)
        };
        let rows = frame_count.div_ceil(cols as usize) as u32;
        Ok(Self { cols, rows })
    }

    /// Grid cell `(col, row)` of frame `i`, in row-major order.
    pub fn cell(self, i: usize) -> (u32, u32) {
        let col = (i % (self.cols as usize)) as u32;
        let row = (i / (self.cols as usize)) as u32;
        (col, row)
    }

    /// Pixel origin of frame `i` for `cell_width x cell_height` cells.
    pub fn cell_origin(self, i: usize, cell_width: u32, cell_height: u32) -> (u32, u32) {
        let (col, row) = self.cell(i);
        (col * cell_width, row * cell_height)
    }

    /// Total cell capacity; at least the frame count it was computed for.
    pub fn capacity(self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/layout.rs"]
mod tests;
