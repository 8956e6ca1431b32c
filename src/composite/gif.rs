use crate::composite::blend::blit_over;
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};

/// GIF frame disposal method, restricted to the four defined codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposal {
    /// Code 0: no disposal specified; the canvas persists as-is.
    Unspecified,
    /// Code 1: keep the frame in place.
    Keep,
    /// Code 2: clear the frame's rectangle back to transparent.
    RestoreBackground,
    /// Code 3: roll the canvas back to its pre-frame state.
    RestorePrevious,
}

impl Disposal {
    /// Map a raw disposal code to a [`Disposal`], rejecting anything outside
    /// the defined 0..=3 domain as malformed input.
    pub fn from_code(code: u8) -> ForgeResult<Self> {
        match code {
            0 => Ok(Self::Unspecified),
            1 => Ok(Self::Keep),
            2 => Ok(Self::RestoreBackground),
            3 => Ok(Self::RestorePrevious),
            other => Err(ForgeError::decode(format!(
                "invalid gif disposal code {other}"
            ))),
        }
    }

    /// The wire code for this disposal method.
    pub fn code(self) -> u8 {
        match self {
            Self::Unspecified => 0,
            Self::Keep => 1,
            Self::RestoreBackground => 2,
            Self::RestorePrevious => 3,
        }
    }
}

/// One decoded GIF frame patch, as handed over by the decoder: pixel data plus
/// its placement within the logical canvas and its disposal method.
#[derive(Clone, Debug)]
pub struct GifPatch {
    /// Patch pixels at the patch's own size.
    pub pixels: RasterBuffer,
    /// Horizontal placement within the canvas.
    pub left: u32,
    /// Vertical placement within the canvas.
    pub top: u32,
    /// Disposal applied after this frame is shown.
    pub disposal: Disposal,
}

/// Replay a sequence of GIF patches against disposal semantics, producing one
/// flattened RGBA frame per emitted GIF frame.
///
/// Frames whose composited canvas is judged empty (see
/// [`RasterBuffer::is_nearly_empty`]) are skipped entirely, which shrinks the
/// output frame count relative to the source GIF.
///
/// Any malformed patch aborts the whole sequence; partial results are
/// discarded (all-or-nothing per source). The `canvas`/`previous` state is
/// private to one call and never shared across sources.
pub fn composite_patches(
    canvas_width: u32,
    canvas_height: u32,
    patches: &[GifPatch],
) -> ForgeResult<Vec<RasterBuffer>> {
    let mut canvas = RasterBuffer::new(canvas_width, canvas_height)?;
    let mut previous = RasterBuffer::new(canvas_width, canvas_height)?;
    let mut out = Vec::with_capacity(patches.len());

    for patch in patches {
        // Snapshot the state this frame must be rolled back to, which is the
        // canvas as it stands *before* this frame draws.
        if patch.disposal == Disposal::RestorePrevious {
            previous = canvas.clone();
        }

        blit_over(&mut canvas, &patch.pixels, patch.left, patch.top)
            .map_err(|e| ForgeError::decode(format!("gif patch out of bounds: {e}")))?;

        if !canvas.is_nearly_empty() {
            out.push(canvas.clone());
        }

        // Disposal applies after emission.
        match patch.disposal {
            Disposal::Unspecified | Disposal::Keep => {}
            Disposal::RestoreBackground => {
                canvas.clear_rect(
                    patch.left,
                    patch.top,
                    patch.pixels.width(),
                    patch.pixels.height(),
                );
            }
            Disposal::RestorePrevious => {
                canvas = previous.clone();
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/gif.rs"]
mod tests;
