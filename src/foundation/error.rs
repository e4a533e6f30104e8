/// Convenience result type used across cuepath.
pub type CuepathResult<T> = Result<T, CuepathError>;

/// Top-level error taxonomy. Every variant is raised while building a stage or a sequence;
/// playback itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum CuepathError {
    /// Invalid user-provided cue, stage or scene data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A cue or query referenced an identifier the stage does not know.
    #[error("target error: {0}")]
    Target(String),

    /// An easing curve was given out-of-range parameters or could not be parsed.
    #[error("easing error: {0}")]
    Easing(String),

    /// Path geometry that cannot be traversed (no segments, unparsable path data).
    #[error("path error: {0}")]
    Path(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CuepathError {
    /// Build a [`CuepathError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CuepathError::Target`] value.
    pub fn target(msg: impl Into<String>) -> Self {
        Self::Target(msg.into())
    }

    /// Build a [`CuepathError::Easing`] value.
    pub fn easing(msg: impl Into<String>) -> Self {
        Self::Easing(msg.into())
    }

    /// Build a [`CuepathError::Path`] value.
    pub fn path(msg: impl Into<String>) -> Self {
        Self::Path(msg.into())
    }

    /// Build a [`CuepathError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
