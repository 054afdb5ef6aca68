use crate::{
    assets::decode::PreparedImage,
    compose::{
        context::RenderContext,
        plan::{SlidePlan, compose_slide},
    },
    foundation::error::SlideResult,
    model::slide::Slide,
    render::{
        backend::{BackendKind, FrameRGBA, create_backend},
        cpu::CpuBackendOpts,
    },
    text::{
        measure::{EmojiSlotMeasurer, MonospaceMeasurer},
        shaper::{FontFace, ParleyMeasurer},
    },
};

/// Advance ratio used for layout when no font is loaded.
pub const FALLBACK_ADVANCE_EM: f64 = 0.6;

/// Turns one slide and its decoded image into a frame.
///
/// Implementations are shared by parallel export jobs, so per-render state (shaper contexts,
/// raster contexts) is created inside [`SlideRenderer::render`].
pub trait SlideRenderer: Send + Sync {
    /// Render `slide` over `image`.
    fn render(
        &self,
        slide: &Slide,
        image: &PreparedImage,
        ctx: &RenderContext,
    ) -> SlideResult<FrameRGBA>;
}

/// Compose with the font's shaper and rasterize on the CPU backend.
#[derive(Clone, Debug, Default)]
pub struct CpuSlideRenderer {
    font: Option<FontFace>,
    opts: CpuBackendOpts,
}

impl CpuSlideRenderer {
    /// Renderer that shapes text with `font`.
    pub fn new(font: FontFace) -> Self {
        Self {
            font: Some(font),
            opts: CpuBackendOpts::default(),
        }
    }

    /// Renderer without a font. Slides with text fail to render.
    pub fn without_font() -> Self {
        Self::default()
    }

    /// Override backend options.
    pub fn with_opts(mut self, opts: CpuBackendOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Plan `slide` with the same measurer [`SlideRenderer::render`] uses.
    pub fn plan(
        &self,
        slide: &Slide,
        ctx: &RenderContext,
        image_w: u32,
        image_h: u32,
    ) -> SlideResult<SlidePlan> {
        match &self.font {
            Some(face) => {
                let mut measurer = EmojiSlotMeasurer::new(ParleyMeasurer::new(face)?);
                compose_slide(slide, ctx, &mut measurer, image_w, image_h)
            }
            None => {
                let mut measurer =
                    EmojiSlotMeasurer::new(MonospaceMeasurer::em(FALLBACK_ADVANCE_EM));
                compose_slide(slide, ctx, &mut measurer, image_w, image_h)
            }
        }
    }
}

impl SlideRenderer for CpuSlideRenderer {
    fn render(
        &self,
        slide: &Slide,
        image: &PreparedImage,
        ctx: &RenderContext,
    ) -> SlideResult<FrameRGBA> {
        let plan = self.plan(slide, ctx, image.width, image.height)?;
        let mut backend = create_backend(BackendKind::Cpu, self.font.as_ref(), self.opts)?;
        backend.render_plan(&plan, image)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/renderer.rs"]
mod tests;
