//! Rasterization of composed slide plans.

/// Frame type, backend trait and factory.
pub mod backend;
/// `vello_cpu` backend.
pub mod cpu;
/// Backend-agnostic plan execution.
pub mod passes;
