//! Style constants and color resolution.

/// Shared design constants.
pub mod constants;
/// Background mode → fill colors and shadow.
pub mod resolve;
