//! Slidetext is a deterministic slide-text compositing engine.
//!
//! An editor preview and a batch exporter render the same slide: a photo with styled, positioned
//! and rotated text on top. Both run the layout math in this crate, so they wrap, size and place
//! text identically at any canvas size:
//!
//! - Resolve an element's normalized position into pixels with [`resolve_transform`]
//! - Wrap text with any [`TextMeasurer`] and size its backdrop with [`background_box`]
//! - Build an ordered [`SlidePlan`] with [`compose_slide`] and rasterize it on a [`RenderBackend`]
//! - Export a whole slideshow with [`BatchExporter`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Source image decoding.
pub mod assets;
/// Per-slide compositing.
pub mod compose;
/// Batch export.
pub mod export;
/// Shared primitives.
pub mod foundation;
/// Placement math.
pub mod geometry;
/// Backdrop sizing.
pub mod layout;
/// Slide records.
pub mod model;
/// Rasterization backends.
pub mod render;
/// Style constants and color resolution.
pub mod style;
/// Measurement, shaping and wrapping.
pub mod text;

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::compose::context::RenderContext;
pub use crate::compose::plan::{
    DrawOp, ImageOp, RectOp, SlidePlan, TextGeometry, TextLineOp, TextPass, compose_slide,
    cover_fit, layout_text,
};
pub use crate::export::exporter::{BatchExporter, ExportOpts, PNG_CONTENT_TYPE};
pub use crate::export::fetch::UrlFetcher;
pub use crate::export::renderer::{CpuSlideRenderer, SlideRenderer};
pub use crate::export::request::{ExportRequest, upload_key};
pub use crate::export::store::{DirStore, InMemoryStore, ObjectStore, SourceFetcher, StoredObject};
pub use crate::foundation::color::{Rgba8, parse_color};
pub use crate::foundation::core::{
    Affine, CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, Point, Rect, Transform2D, Vec2,
};
pub use crate::foundation::error::{ExportError, SlideError, SlideResult};
pub use crate::geometry::scale::{REFERENCE_PREVIEW_WIDTH, resolution_scale};
pub use crate::geometry::transform::{ElementTransform, resolve_transform};
pub use crate::layout::background::{BackgroundBox, background_box};
pub use crate::model::slide::{
    BackgroundMode, FontStyle, FontWeight, Slide, SlideElement, TextStyle, TextTransform,
};
pub use crate::render::backend::{BackendKind, FrameRGBA, RenderBackend, create_backend};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::passes::{PassBackend, execute_plan};
pub use crate::style::constants::StyleConstants;
pub use crate::style::resolve::{ResolvedColors, Shadow, resolve_colors};
pub use crate::text::measure::{EmojiSlotMeasurer, MonospaceMeasurer, TextMeasurer, TextRunStyle};
pub use crate::text::shaper::{FontFace, ParleyMeasurer};
pub use crate::text::wrap::{ELLIPSIS, apply_text_transform, wrap};
