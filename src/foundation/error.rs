/// Convenience result type used across slidetext.
pub type SlideResult<T> = Result<T, SlideError>;

/// Top-level error taxonomy used by layout, compositing and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum SlideError {
    /// Invalid user-provided slide or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The text measurement backend failed. Never replaced by an estimate.
    #[error("measurement error: {0}")]
    Measure(String),

    /// Rasterization failed or a draw op could not be executed.
    #[error("render error: {0}")]
    Render(String),

    /// Fetching a source image or uploading a rendered frame failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SlideError {
    /// Build a [`SlideError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SlideError::Measure`] value.
    pub fn measure(msg: impl Into<String>) -> Self {
        Self::Measure(msg.into())
    }

    /// Build a [`SlideError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`SlideError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Failure of a whole batch export.
///
/// There is no partial-success shape: when an export fails, none of the URLs produced before the
/// failure are returned to the caller.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// The request was rejected before any slide was rendered.
    #[error("invalid export request: {0}")]
    Input(#[source] SlideError),

    /// A slide failed while fetching, rendering or uploading; the batch stopped there.
    #[error("slide {index} ('{slide_id}') failed: {source}")]
    Slide {
        /// Zero-based index of the slide in export order.
        index: usize,
        /// Identifier of the failing slide.
        slide_id: String,
        /// Underlying failure.
        #[source]
        source: SlideError,
    },
}

impl ExportError {
    /// Index of the failing slide, if the failure is slide-specific.
    pub fn slide_index(&self) -> Option<usize> {
        match self {
            Self::Input(_) => None,
            Self::Slide { index, .. } => Some(*index),
        }
    }

    /// Identifier of the failing slide, if the failure is slide-specific.
    pub fn slide_id(&self) -> Option<&str> {
        match self {
            Self::Input(_) => None,
            Self::Slide { slide_id, .. } => Some(slide_id),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
