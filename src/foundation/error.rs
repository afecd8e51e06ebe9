/// Convenience result type used across beatframe.
pub type BeatframeResult<T> = Result<T, BeatframeError>;

/// Fatal errors. Everything here surfaces while a project is prepared, before any
/// frame is evaluated; recoverable conditions are reported as
/// [`crate::SceneWarning`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum BeatframeError {
    /// Invalid caller-provided configuration (fps, durations, easing names, overlaps).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Frame evaluation was asked for something outside the prepared project.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing documents.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BeatframeError {
    /// Build a [`BeatframeError::InvalidConfiguration`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Build a [`BeatframeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`BeatframeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for BeatframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
