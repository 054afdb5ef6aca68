//! Editor-facing slide records.

/// `Slide`, `SlideElement` and `TextStyle`.
pub mod slide;
