use crate::{
    foundation::{core::Canvas, error::SlideResult},
    geometry::scale::{REFERENCE_PREVIEW_WIDTH, resolution_scale},
    model::slide::TextStyle,
    style::constants::StyleConstants,
};

/// Per-call render parameters. Built fresh for every render, never persisted.
///
/// The measurer bound to the active font travels next to this value rather than inside it, so
/// the context stays `Clone + Send + Sync` and can be shared by parallel export jobs.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    /// Target canvas.
    pub canvas: Canvas,
    /// Width of the preview surface styles were authored against.
    pub reference_width: f64,
    /// `canvas.width / reference_width`.
    pub resolution_scale: f64,
    /// Design constants.
    pub constants: StyleConstants,
}

impl RenderContext {
    /// Validate inputs and derive the resolution scale.
    pub fn new(
        canvas: Canvas,
        reference_width: f64,
        constants: StyleConstants,
    ) -> SlideResult<Self> {
        canvas.validate()?;
        constants.validate()?;
        let resolution_scale = resolution_scale(canvas.width_f64(), reference_width)?;
        Ok(Self {
            canvas,
            reference_width,
            resolution_scale,
            constants,
        })
    }

    /// 1080×1920 against the 375-wide reference preview.
    pub fn export_default() -> Self {
        Self {
            canvas: Canvas::EXPORT,
            reference_width: REFERENCE_PREVIEW_WIDTH,
            resolution_scale: Canvas::EXPORT.width_f64() / REFERENCE_PREVIEW_WIDTH,
            constants: StyleConstants::default(),
        }
    }

    /// Multiply a reference-pixel length by the resolution scale.
    pub fn scaled(&self, reference_px: f64) -> f64 {
        reference_px * self.resolution_scale
    }

    /// Effective font size in pixels for `style`.
    pub fn font_size_px(&self, style: &TextStyle) -> f64 {
        self.scaled(style.font_size)
    }

    /// Wrap width in container-local pixels.
    pub fn max_text_width(&self) -> f64 {
        self.canvas.width_f64() * self.constants.max_text_width_ratio
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/context.rs"]
mod tests;
