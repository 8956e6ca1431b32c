/// Reference frame rate used when converting sample indices to timestamps.
pub const VIDEO_SAMPLE_FPS: u32 = 30;

/// Frame sampling quality preset for video sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingQuality {
    /// Sparse sampling, small output.
    Low,
    /// Balanced default.
    #[default]
    Medium,
    /// Dense sampling.
    High,
    /// Near-exhaustive sampling.
    Ultra,
}

/// Concrete sampling parameters for a quality preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Keep one frame out of every `sample_interval` source frames.
    pub sample_interval: u32,
    /// Hard cap on sampled frames.
    pub max_frames: u32,
}

impl SamplingQuality {
    /// The preset table.
    pub fn config(self) -> SamplingConfig {
        match self {
            Self::Low => SamplingConfig {
                sample_interval: 15,
                max_frames: 30,
            },
            Self::Medium => SamplingConfig {
                sample_interval: 10,
                max_frames: 50,
            },
            Self::High => SamplingConfig {
                sample_interval: 5,
                max_frames: 100,
            },
            Self::Ultra => SamplingConfig {
                sample_interval: 2,
                max_frames: 200,
            },
        }
    }
}

/// Timestamps (in seconds) at which an external video decoder should capture
/// frames for a clip of `duration_secs`.
///
/// The decoder itself is an external collaborator; this only plans the seek
/// points. Decoding must suspend between each seek-and-capture step.
pub fn sample_timestamps(duration_secs: f64, quality: SamplingQuality) -> Vec<f64> {
    if !duration_secs.is_finite() || duration_secs <= 0.0 {
        return Vec::new();
    }
    let cfg = quality.config();
    let total_frames = (duration_secs * f64::from(VIDEO_SAMPLE_FPS)).floor() as u64;
    let samples = (total_frames / u64::from(cfg.sample_interval)).min(u64::from(cfg.max_frames));

    (0..samples)
        .map(|i| (i * u64::from(cfg.sample_interval)) as f64 / f64::from(VIDEO_SAMPLE_FPS))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/sampling.rs"]
mod tests;
