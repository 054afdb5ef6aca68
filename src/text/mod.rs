//! Text measurement, shaping and line wrapping.

/// The measurer abstraction, monospace and emoji-slot measurers.
pub mod measure;
/// Parley-backed font registration and line shaping.
pub mod shaper;
/// Greedy wrapping, truncation and case transforms.
pub mod wrap;
