/// Convenience result type used across cinescroll.
pub type CineResult<T> = Result<T, CineError>;

/// Top-level error taxonomy.
///
/// Errors only surface while loading or building a sequence. Once a [`crate::Sequencer`] exists,
/// every per-frame operation is total.
#[derive(thiserror::Error, Debug)]
pub enum CineError {
    /// Invalid numeric configuration (zero fade widths, inverted ranges, non-finite values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Structurally inconsistent configuration (unknown phase names, duplicates).
    #[error("configuration error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CineError {
    /// Build a [`CineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CineError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`CineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
