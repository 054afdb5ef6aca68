//! Shared primitives: canvas and transform types, colors, errors and pixel math.

/// Straight-alpha RGBA colors and CSS-like parsing.
pub mod color;
/// Canvas size and 2D transform primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
