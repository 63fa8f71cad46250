/// Convenience result type used across framecut.
pub type FramecutResult<T> = Result<T, FramecutError>;

/// Top-level error taxonomy used by slicing and compositing APIs.
///
/// `Configuration` and `ContainerCorruption` are fatal for the single item being processed;
/// a batch driver reports them and carries on with the remaining items.
#[derive(thiserror::Error, Debug)]
pub enum FramecutError {
    /// Invalid or contradictory slicing parameters, raised before any pixel work.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Animated container data that cannot be composited (out-of-bounds frame, bad disposal code).
    #[error("container corruption: {0}")]
    ContainerCorruption(String),

    /// Failure reported by an external still-image or container codec.
    #[error("codec error: {0}")]
    Codec(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramecutError {
    /// Build a [`FramecutError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`FramecutError::ContainerCorruption`] value.
    pub fn container_corruption(msg: impl Into<String>) -> Self {
        Self::ContainerCorruption(msg.into())
    }

    /// Build a [`FramecutError::Codec`] value.
    pub fn codec(msg: impl Into<String>) -> Self {
        Self::Codec(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
