//! Source image decoding.

/// Decode raster bytes into premultiplied RGBA8.
pub mod decode;
