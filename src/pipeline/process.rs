use rayon::prelude::*;

use crate::assets::store::SourceSheetStore;
use crate::filters::background::{RemovalOptions, remove_background};
use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};
use crate::model::sheet::{Frame, SheetId};
use crate::quantize::dither::apply_palette;
use crate::quantize::palette::build_palette;
use crate::scale::nearest::scale_nearest;
use crate::settings::{MAX_ERODE_ITERATIONS, MIN_TARGET_SIZE};
use crate::sheet::pack::{OutputSheet, pack_frames};

/// Color reduction settings for the optional quantization pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuantizeOptions {
    /// Maximum palette size.
    pub max_colors: usize,
    /// Apply Floyd-Steinberg error diffusion.
    pub dither: bool,
}

/// Threading and chunking controls for multi-frame processing.
///
/// Chunk boundaries are the pipeline's cooperative yield points: a host event
/// loop can interleave work between chunks. Chunking and threading never
/// change the output.
#[derive(Clone, Debug)]
pub struct ProcessThreading {
    /// Process frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for ProcessThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// Full configuration for one processing run.
#[derive(Clone, Debug)]
pub struct ProcessOptions {
    /// Output frame width in pixels.
    pub target_width: u32,
    /// Output frame height in pixels.
    pub target_height: u32,
    /// Fixed column count for the output grid; zero means auto.
    pub output_cols: u32,
    /// Background removal, when enabled.
    pub removal: Option<RemovalOptions>,
    /// Palette quantization, when enabled.
    pub quantize: Option<QuantizeOptions>,
    /// Threading and chunking controls.
    pub threading: ProcessThreading,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            target_width: 32,
            target_height: 32,
            output_cols: 0,
            removal: None,
            quantize: None,
            threading: ProcessThreading::default(),
        }
    }
}

impl ProcessOptions {
    /// Reject configurations outside the caller-facing bounds before any core
    /// component runs.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.target_width < MIN_TARGET_SIZE || self.target_height < MIN_TARGET_SIZE {
            return Err(ForgeError::validation(format!(
                "target size must be at least {MIN_TARGET_SIZE}px"
            )));
        }
        if let Some(removal) = &self.removal
            && removal.erode_iterations > MAX_ERODE_ITERATIONS
        {
            return Err(ForgeError::validation(format!(
                "erosion iterations must be at most {MAX_ERODE_ITERATIONS}"
            )));
        }
        if let Some(q) = &self.quantize
            && q.max_colors == 0
        {
            return Err(ForgeError::validation("palette size must be at least 1"));
        }
        Ok(())
    }
}

/// Report from batch ingestion with per-source failure isolation.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Ids of sheets that were ingested, in input order.
    pub ingested: Vec<SheetId>,
    /// Failed sources with their errors; these were skipped, not fatal.
    pub failures: Vec<(String, ForgeError)>,
}

/// Ingest a batch of GIF sources, isolating failures per source.
///
/// A malformed source is reported and skipped; every other source and any
/// previously ingested sheet stays intact.
#[tracing::instrument(skip(store, sources))]
pub fn ingest_gif_batch(
    store: &mut SourceSheetStore,
    sources: &[(String, Vec<u8>)],
) -> IngestReport {
    let mut report = IngestReport::default();
    for (name, bytes) in sources {
        match store.insert_gif(name, bytes) {
            Ok(id) => report.ingested.push(id),
            Err(e) => {
                tracing::warn!(source = %name, error = %e, "skipping malformed gif source");
                report.failures.push((name.clone(), e));
            }
        }
    }
    report
}

/// Run the full processing pipeline over the selected frames.
///
/// Each selected frame is cut from its sheet, scaled to the target size with
/// letterboxing, optionally background-removed, then all frames are packed
/// into one sheet and optionally quantized. Zero selected frames is a no-op
/// (`Ok(None)`), not an error.
#[tracing::instrument(skip(store, frames), fields(frames = frames.len()))]
pub fn process_sprites(
    store: &SourceSheetStore,
    frames: &[Frame],
    opts: &ProcessOptions,
) -> ForgeResult<Option<OutputSheet>> {
    opts.validate()?;

    let selected: Vec<&Frame> = frames.iter().filter(|f| f.selected).collect();
    if store.is_empty() || selected.is_empty() {
        return Ok(None);
    }

    let scaled = if opts.threading.parallel {
        process_frames_parallel(store, &selected, opts)?
    } else {
        process_frames_sequential(store, &selected, opts)?
    };

    let mut sheet = pack_frames(&scaled, opts.target_width, opts.target_height, opts.output_cols)?;
    tracing::debug!(
        cols = sheet.layout.cols,
        rows = sheet.layout.rows,
        "packed output sheet"
    );

    if let Some(q) = &opts.quantize {
        let palette = build_palette(&sheet.raster, q.max_colors)?;
        if !palette.is_empty() {
            apply_palette(&mut sheet.raster, &palette, q.dither)?;
        }
        tracing::debug!(colors = palette.len(), dither = q.dither, "quantized output");
    }

    Ok(Some(sheet))
}

fn process_one(store: &SourceSheetStore, frame: &Frame, opts: &ProcessOptions) -> ForgeResult<RasterBuffer> {
    let sheet = store.get(frame.sheet)?;
    let cropped = sheet.crop_frame(frame.col, frame.row)?;
    let mut scaled = scale_nearest(&cropped, opts.target_width, opts.target_height)?;
    if let Some(removal) = &opts.removal {
        scaled = remove_background(&scaled, removal)?;
    }
    Ok(scaled)
}

fn process_frames_sequential(
    store: &SourceSheetStore,
    selected: &[&Frame],
    opts: &ProcessOptions,
) -> ForgeResult<Vec<RasterBuffer>> {
    let chunk_size = opts.threading.chunk_size.max(1);
    let mut out = Vec::with_capacity(selected.len());
    for chunk in selected.chunks(chunk_size) {
        for frame in chunk {
            out.push(process_one(store, frame, opts)?);
        }
        // Chunk boundary: cooperative yield point for a host event loop.
    }
    Ok(out)
}

fn process_frames_parallel(
    store: &SourceSheetStore,
    selected: &[&Frame],
    opts: &ProcessOptions,
) -> ForgeResult<Vec<RasterBuffer>> {
    let pool = build_thread_pool(opts.threading.threads)?;
    let chunk_size = opts.threading.chunk_size.max(1);

    let mut out = Vec::with_capacity(selected.len());
    for chunk in selected.chunks(chunk_size) {
        let results: Vec<ForgeResult<RasterBuffer>> = pool.install(|| {
            chunk
                .par_iter()
                .map(|frame| process_one(store, frame, opts))
                .collect()
        });
        for r in results {
            out.push(r?);
        }
    }
    Ok(out)
}

fn build_thread_pool(threads: Option<usize>) -> ForgeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ForgeError::validation(
            "process threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ForgeError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/process.rs"]
mod tests;
