//! Per-slide compositing: render context and the ordered draw plan.

/// Render context (canvas, resolution scale, constants).
pub mod context;
/// Draw-op plan and the compositor state machine.
pub mod plan;
