use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Stable hashed identifier for an ingested source sheet.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SheetId(pub(crate) u64);

impl SheetId {
    /// Construct a [`SheetId`] from a raw 64-bit value.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Where a source sheet's pixels originally came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SourceKind {
    /// A still sprite-sheet image.
    Image,
    /// An animated GIF, flattened into an intermediate sheet.
    Gif,
    /// Pre-decoded video frames, flattened into an intermediate sheet.
    Video,
}

/// A `cols x rows` subdivision describing how frames are cut from a sheet.
///
/// Changing the grid never resizes the underlying image; it only reinterprets
/// the cut and must be followed by bulk frame regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetGrid {
    /// Number of frame columns.
    pub cols: u32,
    /// Number of frame rows.
    pub rows: u32,
}

impl SheetGrid {
    /// Build a grid, rejecting zero dimensions.
    pub fn new(cols: u32, rows: u32) -> ForgeResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(ForgeError::validation("sheet grid must be at least 1x1"));
        }
        Ok(Self { cols, rows })
    }

    /// Total cell count.
    pub fn cell_count(self) -> usize {
        (self.cols as usize) * (self.rows as usize)
    }
}

/// An ingested source image plus the grid that cuts it into frames.
#[derive(Clone, Debug)]
pub struct SourceSheet {
    /// Stable identifier.
    pub id: SheetId,
    /// User-facing name (usually the file name).
    pub name: String,
    /// Backing pixels.
    pub raster: RasterBuffer,
    /// Frame subdivision.
    pub grid: SheetGrid,
    /// Origin of the pixels.
    pub kind: SourceKind,
}

impl SourceSheet {
    /// Per-frame cell size derived from the live image dimensions.
    ///
    /// Integer division: remainder pixels at the right/bottom edges are not
    /// part of any frame.
    pub fn frame_size(&self) -> ForgeResult<(u32, u32)> {
        let w = self.raster.width() / self.grid.cols;
        let h = self.raster.height() / self.grid.rows;
        if w == 0 || h == 0 {
            return Err(ForgeError::validation(format!(
                "grid {}x{} leaves no pixels per frame for sheet '{}'",
                self.grid.cols, self.grid.rows, self.name
            )));
        }
        Ok((w, h))
    }

    /// Cut the frame at grid cell `(col, row)` out of the sheet.
    pub fn crop_frame(&self, col: u32, row: u32) -> ForgeResult<RasterBuffer> {
        if col >= self.grid.cols || row >= self.grid.rows {
            return Err(ForgeError::validation(format!(
                "frame cell ({col}, {row}) outside grid {}x{}",
                self.grid.cols, self.grid.rows
            )));
        }
        let (fw, fh) = self.frame_size()?;
        self.raster.crop(col * fw, row * fh, fw, fh)
    }
}

/// A logical frame: a cell reference into a source sheet.
///
/// Frames own no pixels; they are resolved against their sheet's live raster
/// at processing time. The full frame list is regenerated in bulk whenever the
/// sheet set or any sheet's grid changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Owning sheet.
    pub sheet: SheetId,
    /// Column within the sheet grid.
    pub col: u32,
    /// Row within the sheet grid.
    pub row: u32,
    /// Global sequence index across all sheets.
    pub index: u32,
    /// Sequence index within the owning sheet.
    pub local_index: u32,
    /// Whether the frame participates in output.
    pub selected: bool,
}

#[cfg(test)]
#[path = "../../tests/unit/model/sheet.rs"]
mod tests;
