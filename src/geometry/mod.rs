//! Resolution-independent placement math.

/// Resolution scale between the reference preview and a target canvas.
pub mod scale;
/// Normalized element → pixel transform.
pub mod transform;
