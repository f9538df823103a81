/// Convenience result type used across the carousel engine.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Rendering itself never fails once an engine is built: bad backgrounds and missing fonts are
/// degraded in place. These variants surface from configuration, loading and export.
#[derive(thiserror::Error, Debug)]
pub enum CarouselError {
    /// Invalid user-provided configuration or input data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A background image or other asset could not be loaded.
    #[error("asset error: {0}")]
    Asset(String),

    /// A font source could not be read or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CarouselError {
    /// Build a [`CarouselError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CarouselError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`CarouselError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`CarouselError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
