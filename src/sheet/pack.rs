use crate::composite::blend::blit_over;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::sheet::layout::SheetLayout;

/// A packed sprite sheet: final pixels plus the grid they were packed with.
#[derive(Clone, Debug)]
pub struct OutputSheet {
    /// Packed pixels, `layout.cols * frame_width` by `layout.rows * frame_height`.
    pub raster: RasterBuffer,
    /// Grid used for packing (and for any later playback indexing).
    pub layout: SheetLayout,
    /// Width of each packed frame.
    pub frame_width: u32,
    /// Height of each packed frame.
    pub frame_height: u32,
}

/// Composite an ordered list of same-size frames into one sheet.
///
/// Frame `i` lands at grid cell `(i % cols, i / cols)` with no gaps and no
/// scaling; frames are alpha-composited onto an initially transparent canvas.
pub fn pack_frames(
    frames: &[RasterBuffer],
    frame_width: u32,
    frame_height: u32,
    output_cols: u32,
) -> ForgeResult<OutputSheet> {
    let layout = SheetLayout::for_frames(frames.len(), output_cols)?;

    for (i, frame) in frames.iter().enumerate() {
        if frame.width() != frame_width || frame.height() != frame_height {
            return Err(ForgeError::validation(format!(
                "frame {i} is {}x{}, expected {frame_width}x{frame_height}",
                frame.width(),
                frame.height()
            )));
        }
    }

    let sheet_w = layout
        .cols
        .checked_mul(frame_width)
        .ok_or_else(|| ForgeError::surface("sheet width overflows u32"))?;
    let sheet_h = layout
        .rows
        .checked_mul(frame_height)
        .ok_or_else(|| ForgeError::surface("sheet height overflows u32"))?;
    let mut raster = RasterBuffer::new(sheet_w, sheet_h)?;
    for (i, frame) in frames.iter().enumerate() {
        let (x, y) = layout.cell_origin(i, frame_width, frame_height);
        blit_over(&mut raster, frame, x, y)?;
    }

    Ok(OutputSheet {
        raster,
        layout,
        frame_width,
        frame_height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/sheet/pack.rs"]
mod tests;
