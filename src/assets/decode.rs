use anyhow::Context;

use crate::composite::gif::{Disposal, GifPatch};
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Decode encoded still-image bytes (PNG, WebP, JPEG, ...) into straight-alpha
/// RGBA8.
pub fn decode_image(bytes: &[u8]) -> ForgeResult<RasterBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterBuffer::from_rgba8(width, height, rgba.into_raw())
}

/// Decoded GIF: logical canvas size plus the ordered per-frame patches.
#[derive(Clone, Debug)]
pub struct DecodedGif {
    /// Logical canvas width shared by all frames.
    pub canvas_width: u32,
    /// Logical canvas height shared by all frames.
    pub canvas_height: u32,
    /// Per-frame patches in presentation order.
    pub patches: Vec<GifPatch>,
}

/// Parse raw GIF bytes into per-frame patches with placement and disposal.
///
/// Frames are expanded to RGBA by the decoder; a failure on any frame aborts
/// the whole source.
pub fn decode_gif(bytes: &[u8]) -> ForgeResult<DecodedGif> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = options
        .read_info(std::io::Cursor::new(bytes))
        .context("parse gif header")?;

    let canvas_width = u32::from(decoder.width());
    let canvas_height = u32::from(decoder.height());

    let mut patches = Vec::new();
    loop {
        let frame = match decoder.read_next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(e) => return Err(ForgeError::decode(format!("decode gif frame: {e}"))),
        };

        let width = u32::from(frame.width);
        let height = u32::from(frame.height);
        let pixels = RasterBuffer::from_rgba8(width, height, frame.buffer.to_vec())
            .map_err(|e| ForgeError::decode(format!("malformed gif patch: {e}")))?;

        let disposal = match frame.dispose {
            gif::DisposalMethod::Any => Disposal::Unspecified,
            gif::DisposalMethod::Keep => Disposal::Keep,
            gif::DisposalMethod::Background => Disposal::RestoreBackground,
            gif::DisposalMethod::Previous => Disposal::RestorePrevious,
        };

        patches.push(GifPatch {
            pixels,
            left: u32::from(frame.left),
            top: u32::from(frame.top),
            disposal,
        });
    }

    Ok(DecodedGif {
        canvas_width,
        canvas_height,
        patches,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
