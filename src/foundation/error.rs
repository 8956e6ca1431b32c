/// Convenience result type used across Spriteforge.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// Per-source decode failures are isolated by batch ingestion and never abort
/// sibling sources; the remaining variants propagate up and abort the current
/// operation.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// Malformed GIF/image input. Aborts that source only.
    #[error("decode error: {0}")]
    Decode(String),

    /// A working pixel buffer of the requested size cannot be created.
    #[error("surface error: {0}")]
    Surface(String),

    /// Invalid caller-provided configuration or data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ForgeError {
    /// Build a [`ForgeError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`ForgeError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`ForgeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ForgeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
