use crate::foundation::error::{ForgeError, ForgeResult};

/// Caller-facing minimum for output frame dimensions, in pixels.
pub const MIN_TARGET_SIZE: u32 = 8;

/// Upper bound on erosion passes accepted at the configuration boundary.
pub const MAX_ERODE_ITERATIONS: u32 = 10;

/// Flat, JSON-round-trippable settings record.
///
/// Every key is individually optional when deserializing; missing or unknown
/// keys fall back to their defaults, so partial documents are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConverterSettings {
    /// Default grid columns for newly ingested sprite sheets.
    pub src_cols: u32,
    /// Default grid rows for newly ingested sprite sheets.
    pub src_rows: u32,
    /// Output frame width in pixels.
    pub target_width: u32,
    /// Output frame height in pixels.
    pub target_height: u32,
    /// Preview playback rate in frames per second.
    pub fps: u32,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            src_cols: 8,
            src_rows: 4,
            target_width: 32,
            target_height: 32,
            fps: 12,
        }
    }
}

impl ConverterSettings {
    /// Parse settings from a JSON document, applying per-key defaults.
    pub fn from_json(json: &str) -> ForgeResult<Self> {
        serde_json::from_str(json).map_err(|e| ForgeError::serde(format!("parse settings: {e}")))
    }

    /// Serialize settings to pretty-printed JSON.
    pub fn to_json(&self) -> ForgeResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ForgeError::serde(format!("serialize settings: {e}")))
    }

    /// Reject values outside the caller-facing bounds.
    pub fn validate(&self) -> ForgeResult<()> {
        if self.src_cols == 0 || self.src_rows == 0 {
            return Err(ForgeError::validation("source grid must be at least 1x1"));
        }
        if self.target_width < MIN_TARGET_SIZE || self.target_height < MIN_TARGET_SIZE {
            return Err(ForgeError::validation(format!(
                "target size must be at least {MIN_TARGET_SIZE}px"
            )));
        }
        if self.fps == 0 {
            return Err(ForgeError::validation("fps must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/settings.rs"]
mod tests;
