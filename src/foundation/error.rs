/// Convenience result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error type for the rendering core.
///
/// Nothing inside `composite_frame` surfaces these to the caller; per-clip and per-effect failures
/// are logged and degrade to a visible-but-wrong frame. They are returned from the lower-level
/// building blocks (frame sources, effects, loaders) so the caller of those can decide.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Input data failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Keyframe or animation data could not be used.
    #[error("animation error: {0}")]
    Animation(String),

    /// An effect could not be applied.
    #[error("effect error: {0}")]
    Effect(String),

    /// Media could not be located, probed or decoded.
    #[error("media error: {0}")]
    Media(String),

    /// Rasterization or compositing failed.
    #[error("render error: {0}")]
    Render(String),

    /// Persisted data could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ReelError::Effect`].
    pub fn effect(msg: impl Into<String>) -> Self {
        Self::Effect(msg.into())
    }

    /// Build a [`ReelError::Media`].
    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    /// Build a [`ReelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
