use std::sync::Arc;

use kurbo::Shape;

use crate::{
    assets::decode::PreparedImage,
    compose::plan::{ImageOp, RectOp, TextLineOp},
    foundation::{
        color::Rgba8,
        core::{Affine, Canvas, Rect},
        error::{SlideError, SlideResult},
    },
    render::{
        backend::{FrameRGBA, RenderBackend},
        passes::PassBackend,
    },
    text::{
        measure::{TextMeasurer, TextRun, emoji_runs},
        shaper::{FontFace, ParleyMeasurer, TextBrushRgba8},
    },
};

/// Options for [`CpuBackend`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackendOpts {
    /// Color the frame is cleared to before any op runs. Transparent when `None`.
    pub clear_rgba: Option<Rgba8>,
}

impl CpuBackendOpts {
    /// Set the clear color.
    pub fn with_clear_rgba(mut self, clear_rgba: Option<Rgba8>) -> Self {
        self.clear_rgba = clear_rgba;
        self
    }
}

struct CpuText {
    shaper: ParleyMeasurer,
    font: vello_cpu::peniko::FontData,
}

struct CpuFrame {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

/// `vello_cpu` rasterizer.
///
/// Text ops need a font; a backend built with [`CpuBackend::new`] can still draw images and
/// boxes, and fails with a render error on the first text op.
pub struct CpuBackend {
    opts: CpuBackendOpts,
    text: Option<CpuText>,
    frame: Option<CpuFrame>,
}

impl std::fmt::Debug for CpuBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuBackend")
            .field("opts", &self.opts)
            .field("has_font", &self.text.is_some())
            .field("in_frame", &self.frame.is_some())
            .finish()
    }
}

impl CpuBackend {
    /// Backend without a font.
    pub fn new(opts: CpuBackendOpts) -> Self {
        Self {
            opts,
            text: None,
            frame: None,
        }
    }

    /// Backend that shapes and draws text with `face`.
    pub fn with_font(face: &FontFace, opts: CpuBackendOpts) -> SlideResult<Self> {
        let shaper = ParleyMeasurer::new(face)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes().to_vec()),
            0,
        );
        Ok(Self {
            opts,
            text: Some(CpuText { shaper, font }),
            frame: None,
        })
    }

    fn frame_mut(&mut self) -> SlideResult<&mut CpuFrame> {
        self.frame
            .as_mut()
            .ok_or_else(|| SlideError::render("draw call outside begin/finish"))
    }
}

impl PassBackend for CpuBackend {
    fn begin(&mut self, canvas: Canvas) -> SlideResult<()> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| SlideError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| SlideError::render("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        if let Some(clear) = self.opts.clear_rgba
            && !clear.is_transparent()
        {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(color_to_cpu(clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        self.frame = Some(CpuFrame { width, height, ctx });
        Ok(())
    }

    fn draw_image(&mut self, op: &ImageOp, image: &PreparedImage) -> SlideResult<()> {
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let frame = self.frame_mut()?;
        let ctx = &mut frame.ctx;

        ctx.set_transform(affine_to_cpu(op.transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }

    fn fill_rounded_rect(&mut self, op: &RectOp) -> SlideResult<()> {
        if op.color.is_transparent() || op.rect.area() <= 0.0 {
            return Ok(());
        }
        let frame = self.frame_mut()?;
        fill_rounded(&mut frame.ctx, op.transform, op.rect, op.radius, op.color);
        Ok(())
    }

    fn draw_text_line(&mut self, op: &TextLineOp) -> SlideResult<()> {
        if op.text.is_empty() || op.color.is_transparent() {
            return Ok(());
        }
        let Some(text) = self.text.as_mut() else {
            return Err(SlideError::render(format!(
                "no font loaded to draw \"{}\"",
                op.text
            )));
        };
        let frame = self
            .frame
            .as_mut()
            .ok_or_else(|| SlideError::render("draw call outside begin/finish"))?;
        let ctx = &mut frame.ctx;

        text.shaper.configure(&op.style)?;
        let brush = TextBrushRgba8 {
            r: op.color.r,
            g: op.color.g,
            b: op.color.b,
            a: op.color.a,
        };

        let mut x = op.origin.x;
        for run in emoji_runs(&op.text) {
            match run {
                TextRun::Text(s) => {
                    let layout = text.shaper.layout_line(s, brush)?;
                    let y = op.origin.y + (op.slot_height - f64::from(layout.height())) / 2.0;
                    ctx.set_transform(affine_to_cpu(op.transform * Affine::translate((x, y))));
                    for line in layout.lines() {
                        for item in line.items() {
                            let parley::layout::PositionedLayoutItem::GlyphRun(glyph_run) = item
                            else {
                                continue;
                            };
                            let brush = glyph_run.style().brush;
                            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                                brush.r, brush.g, brush.b, brush.a,
                            ));
                            let glyphs = glyph_run.glyphs().map(|g| vello_cpu::Glyph {
                                id: g.id,
                                x: g.x,
                                y: g.y,
                            });
                            ctx.glyph_run(&text.font)
                                .font_size(glyph_run.run().font_size())
                                .fill_glyphs(glyphs);
                        }
                    }
                    x += f64::from(layout.full_width());
                }
                TextRun::Emoji(_) => {
                    // Color emoji fonts are not rasterized; the slot keeps its measured width.
                    let size = op.style.font_size;
                    let y = op.origin.y + (op.slot_height - size) / 2.0;
                    let inset = size * 0.1;
                    fill_rounded(
                        ctx,
                        op.transform,
                        Rect::new(x + inset, y + inset, x + size - inset, y + size - inset),
                        size * 0.2,
                        op.color,
                    );
                    x += size;
                }
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> SlideResult<FrameRGBA> {
        let Some(mut frame) = self.frame.take() else {
            return Err(SlideError::render("finish called before begin"));
        };
        let mut pixmap = vello_cpu::Pixmap::new(frame.width, frame.height);
        frame.ctx.flush();
        frame.ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: u32::from(frame.width),
            height: u32::from(frame.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl RenderBackend for CpuBackend {}

fn fill_rounded(
    ctx: &mut vello_cpu::RenderContext,
    transform: Affine,
    rect: Rect,
    radius: f64,
    color: Rgba8,
) {
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(color_to_cpu(color));

    let radius = radius.min(rect.width() / 2.0).min(rect.height() / 2.0);
    if radius <= 0.0 {
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        return;
    }
    let rr = kurbo::RoundedRect::from_rect(rect, radius);
    ctx.fill_path(&bezpath_to_cpu(rr.path_elements(0.1)));
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(elements: impl IntoIterator<Item = kurbo::PathEl>) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in elements {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SlideResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SlideError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SlideError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SlideError::render("image byte length mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
