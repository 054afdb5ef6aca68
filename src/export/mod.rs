//! Batch export: fetch each slide's image, render it, upload the frame.

/// Batch exporter and its options.
pub mod exporter;
/// URL fetcher for `file://` and `http(s)://` sources.
pub mod fetch;
/// Slide renderer used by export jobs.
pub mod renderer;
/// Export request model and validation.
pub mod request;
/// Object store and fetcher traits with directory and in-memory stores.
pub mod store;
