//! Spriteforge turns animated visual sources into pixel-art sprite sheets.
//!
//! Sources can be multi-frame sprite-sheet images, animated GIFs, or
//! pre-decoded video frames. Frames are extracted, optionally chroma-keyed to
//! remove their background, nearest-neighbor resized to a fixed target
//! resolution, packed into an output grid, and optionally reduced to a small
//! palette.
//!
//! # Pipeline overview
//!
//! 1. **Ingest**: decode sources into [`SourceSheet`]s held by a
//!    [`SourceSheetStore`]; GIFs are flattened frame-by-frame by
//!    [`composite_patches`] with full disposal-method semantics.
//! 2. **Cut + scale**: each selected [`Frame`] is cut from its sheet and
//!    resized by [`scale_nearest`] (letterboxed, never interpolated).
//! 3. **Filter** (optional): [`remove_background`] flood-fills
//!    border-connected background away using perceptual color distance.
//! 4. **Pack**: [`pack_frames`] composites the frames into one
//!    [`OutputSheet`] laid out by [`SheetLayout`].
//! 5. **Quantize** (optional): [`build_palette`] + [`apply_palette`] reduce
//!    the sheet to at most N colors, with optional Floyd-Steinberg dithering.
//! 6. **Encode**: [`encode_raster`] produces lossless PNG or WebP bytes.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: every stage is a pure transformation over fully
//!   materialized buffers; threading and chunking never change the output.
//! - **No IO in the core**: decoding is front-loaded at ingestion; video
//!   decoding stays external and hands in raw RGBA frames.
//! - **Straight-alpha RGBA8** end-to-end; alpha 0 means transparent, not
//!   absent.
#![forbid(unsafe_code)]

mod assets;
mod composite;
mod encode;
mod filters;
mod foundation;
mod model;
mod pipeline;
mod quantize;
mod scale;
mod settings;
mod sheet;

pub use assets::decode::{DecodedGif, decode_gif, decode_image};
pub use assets::store::SourceSheetStore;
pub use composite::blend::{StraightRgba8, blit_over, over};
pub use composite::gif::{Disposal, GifPatch, composite_patches};
pub use encode::image::{OutputFormat, encode_raster};
pub use filters::background::{
    BackgroundSource, RemovalOptions, detect_background, erode_alpha_in_place, remove_background,
};
pub use foundation::color::{Lab, delta_e, srgb_to_lab, tolerance_to_delta_e};
pub use foundation::core::{EMPTY_ALPHA_THRESHOLD, EMPTY_FRACTION, RasterBuffer};
pub use foundation::error::{ForgeError, ForgeResult};
pub use model::sheet::{Frame, SheetGrid, SheetId, SourceKind, SourceSheet};
pub use pipeline::process::{
    IngestReport, ProcessOptions, ProcessThreading, QuantizeOptions, ingest_gif_batch,
    process_sprites,
};
pub use pipeline::sampling::{
    SamplingConfig, SamplingQuality, VIDEO_SAMPLE_FPS, sample_timestamps,
};
pub use quantize::dither::apply_palette;
pub use quantize::palette::{Palette, build_palette};
pub use scale::nearest::scale_nearest;
pub use settings::{ConverterSettings, MAX_ERODE_ITERATIONS, MIN_TARGET_SIZE};
pub use sheet::layout::SheetLayout;
pub use sheet::pack::{OutputSheet, pack_frames};
