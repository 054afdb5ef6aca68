//! Backdrop sizing from wrapped lines.

/// Background box and per-line pill geometry.
pub mod background;
