/// Convenience result type used across handwrite.
pub type HandwriteResult<T> = Result<T, HandwriteError>;

/// Top-level error taxonomy.
///
/// Every variant is terminal: a run that hits one produces no video.
#[derive(thiserror::Error, Debug)]
pub enum HandwriteError {
    /// Invalid user-provided parameters or frame geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// The source document could not be read or parsed.
    #[error("input error: {0}")]
    Input(String),

    /// The font resource or cursor marker image is unusable.
    #[error("resource error: {0}")]
    Resource(String),

    /// Frame synthesis or video encoding failed.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandwriteError {
    /// Build a [`HandwriteError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HandwriteError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`HandwriteError::Resource`] value.
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    /// Build a [`HandwriteError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
