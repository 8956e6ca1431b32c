use anyhow::Context;
use image::ImageEncoder;

use crate::foundation::core::RasterBuffer;
use crate::foundation::error::{ForgeError, ForgeResult};

/// Output container format for the packed sheet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossless PNG.
    Png,
    /// Lossless WebP.
    #[default]
    Webp,
}

impl OutputFormat {
    /// Canonical file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ForgeError;

    fn from_str(s: &str) -> ForgeResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            other => Err(ForgeError::validation(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}

/// Encode a raster into the requested container format.
///
/// Both paths are lossless, which keeps hard pixel edges intact.
pub fn encode_raster(raster: &RasterBuffer, format: OutputFormat) -> ForgeResult<Vec<u8>> {
    let mut out = Vec::new();
    match format {
        OutputFormat::Png => {
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(
                    raster.data(),
                    raster.width(),
                    raster.height(),
                    image::ExtendedColorType::Rgba8,
                )
                .context("encode png")?;
        }
        OutputFormat::Webp => {
            image::codecs::webp::WebPEncoder::new_lossless(&mut out)
                .write_image(
                    raster.data(),
                    raster.width(),
                    raster.height(),
                    image::ExtendedColorType::Rgba8,
                )
                .context("encode webp")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/image.rs"]
mod tests;
