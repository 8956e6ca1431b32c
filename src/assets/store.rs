use std::collections::HashMap;

use crate::assets::decode;
use crate::composite::gif::composite_patches;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::foundation::math::Fnv1a64;
use crate::model::sheet::{Frame, SheetGrid, SheetId, SourceKind, SourceSheet};
use crate::sheet::pack::pack_frames;

/// Ordered store of ingested source sheets.
///
/// Sheets keep their insertion order, which fixes the global frame numbering
/// produced by [`SourceSheetStore::generate_frames`]. Removing a sheet or
/// changing a grid invalidates any previously generated frame list; callers
/// regenerate frames in bulk rather than patching them.
#[derive(Clone, Debug, Default)]
pub struct SourceSheetStore {
    sheets: Vec<SourceSheet>,
    index_by_id: HashMap<SheetId, usize>,
    next_ordinal: u64,
}

impl SourceSheetStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ingested sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether the store holds no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Sheets in insertion order.
    pub fn sheets(&self) -> &[SourceSheet] {
        &self.sheets
    }

    /// Look up a sheet by id.
    pub fn get(&self, id: SheetId) -> ForgeResult<&SourceSheet> {
        self.index_by_id
            .get(&id)
            .map(|&i| &self.sheets[i])
            .ok_or_else(|| ForgeError::validation(format!("unknown sheet id {}", id.as_u64())))
    }

    /// Ingest an already-decoded sprite-sheet image with its grid.
    pub fn insert_image(
        &mut self,
        name: &str,
        raster: RasterBuffer,
        grid: SheetGrid,
    ) -> ForgeResult<SheetId> {
        self.insert_sheet(name, raster, grid, SourceKind::Image)
    }

    /// Decode still-image bytes and ingest them as a sprite sheet.
    pub fn insert_image_bytes(
        &mut self,
        name: &str,
        bytes: &[u8],
        grid: SheetGrid,
    ) -> ForgeResult<SheetId> {
        let raster = decode::decode_image(bytes)?;
        self.insert_sheet(name, raster, grid, SourceKind::Image)
    }

    /// Decode a GIF, replay its disposal semantics and ingest the flattened
    /// frames as an intermediate sheet at native frame size.
    pub fn insert_gif(&mut self, name: &str, bytes: &[u8]) -> ForgeResult<SheetId> {
        let decoded = decode::decode_gif(bytes)?;
        let frames = composite_patches(decoded.canvas_width, decoded.canvas_height, &decoded.patches)?;
        self.insert_frames(name, SourceKind::Gif, &frames)
    }

    /// Ingest a sequence of same-size decoded frames (e.g. sampled video
    /// frames), packing them into an intermediate sheet.
    pub fn insert_frames(
        &mut self,
        name: &str,
        kind: SourceKind,
        frames: &[RasterBuffer],
    ) -> ForgeResult<SheetId> {
        let first = frames.first().ok_or_else(|| {
            ForgeError::decode(format!("source '{name}' produced no frames"))
        })?;
        let sheet = pack_frames(frames, first.width(), first.height(), 0)?;
        let grid = SheetGrid::new(sheet.layout.cols, sheet.layout.rows)?;
        self.insert_sheet(name, sheet.raster, grid, kind)
    }

    /// Remove a sheet. Returns whether it existed.
    pub fn remove(&mut self, id: SheetId) -> bool {
        let Some(pos) = self.index_by_id.remove(&id) else {
            return false;
        };
        self.sheets.remove(pos);
        for (i, sheet) in self.sheets.iter().enumerate() {
            self.index_by_id.insert(sheet.id, i);
        }
        true
    }

    /// Reinterpret a sheet's grid without touching its pixels.
    ///
    /// Callers must regenerate frames afterwards.
    pub fn set_grid(&mut self, id: SheetId, grid: SheetGrid) -> ForgeResult<()> {
        let pos = *self
            .index_by_id
            .get(&id)
            .ok_or_else(|| ForgeError::validation(format!("unknown sheet id {}", id.as_u64())))?;
        self.sheets[pos].grid = grid;
        Ok(())
    }

    /// Regenerate the full frame list from scratch, in sheet insertion order
    /// and row-major cell order, with every frame selected.
    pub fn generate_frames(&self) -> Vec<Frame> {
        let mut out = Vec::new();
        let mut index = 0u32;
        for sheet in &self.sheets {
            let mut local = 0u32;
            for row in 0..sheet.grid.rows {
                for col in 0..sheet.grid.cols {
                    out.push(Frame {
                        sheet: sheet.id,
                        col,
                        row,
                        index,
                        local_index: local,
                        selected: true,
                    });
                    index += 1;
                    local += 1;
                }
            }
        }
        out
    }

    fn insert_sheet(
        &mut self,
        name: &str,
        raster: RasterBuffer,
        grid: SheetGrid,
        kind: SourceKind,
    ) -> ForgeResult<SheetId> {
        let id = self.hash_id(name);
        let sheet = SourceSheet {
            id,
            name: name.to_string(),
            raster,
            grid,
            kind,
        };
        // Cell geometry must be viable before the sheet becomes visible.
        sheet.frame_size()?;

        self.index_by_id.insert(id, self.sheets.len());
        self.sheets.push(sheet);
        self.next_ordinal += 1;
        Ok(id)
    }

    fn hash_id(&self, name: &str) -> SheetId {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_bytes(name.as_bytes());
        hasher.write_u8(0);
        hasher.write_u64(self.next_ordinal);
        SheetId(hasher.finish())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
