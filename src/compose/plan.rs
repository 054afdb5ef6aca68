use crate::{
    compose::context::RenderContext,
    foundation::{
        color::Rgba8,
        core::{Affine, Canvas, Point, Rect, Vec2},
        error::{SlideError, SlideResult},
    },
    geometry::transform::{ElementTransform, resolve_transform},
    layout::background::{BackgroundBox, box_from_widths, line_boxes, measure_lines},
    model::slide::{BackgroundMode, Slide},
    style::resolve::resolve_colors,
    text::{
        measure::{TextMeasurer, TextRunStyle},
        wrap::{apply_text_transform, wrap},
    },
};

/// Draw the slide's source image under `transform` (image pixels → canvas pixels).
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOp {
    /// Cover-fit transform.
    pub transform: Affine,
    /// Source width in pixels.
    pub width: u32,
    /// Source height in pixels.
    pub height: u32,
}

/// Fill a rounded rect given in container-local coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct RectOp {
    /// Element transform (container-local → canvas).
    pub transform: Affine,
    /// Rect in container-local pixels.
    pub rect: Rect,
    /// Corner radius.
    pub radius: f64,
    /// Fill color.
    pub color: Rgba8,
}

/// Which of the two text passes an op belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextPass {
    /// Offset dark copy drawn first.
    Shadow,
    /// The visible glyphs.
    Fill,
}

/// Draw one wrapped line into its slot.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLineOp {
    /// Element transform (container-local → canvas).
    pub transform: Affine,
    /// Top-left of the line's slot in container-local pixels.
    pub origin: Point,
    /// Measured width of the line.
    pub width: f64,
    /// Slot height; glyphs are vertically centered in it.
    pub slot_height: f64,
    /// Line text after case transform.
    pub text: String,
    /// Pixel-space style.
    pub style: TextRunStyle,
    /// Glyph color for this pass.
    pub color: Rgba8,
    /// Shadow or fill.
    pub pass: TextPass,
}

/// A single backend-agnostic draw call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Background image.
    Image(ImageOp),
    /// Box or per-line pill.
    RoundedRect(RectOp),
    /// One line of one text pass.
    TextLine(TextLineOp),
}

/// Text layout shared by the editor and the compositor.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextGeometry {
    /// Wrapped lines, exactly as drawn.
    pub lines: Vec<String>,
    /// Measured width of each line.
    pub line_widths: Vec<f64>,
    /// Font size in container-local pixels.
    pub font_size: f64,
    /// Advance between lines.
    pub line_height: f64,
    /// Backdrop / container geometry.
    pub container: BackgroundBox,
    /// Placement of the container on the canvas.
    pub transform: ElementTransform,
}

impl TextGeometry {
    /// Canvas-space center of the container (the rotation and scale pivot).
    pub fn center(&self) -> Point {
        self.transform
            .center(self.container.width, self.container.height)
    }

    /// The affine every text and box op uses.
    pub fn affine(&self) -> Affine {
        self.transform
            .to_affine(self.container.width, self.container.height)
    }
}

/// Ordered draw ops for one slide.
#[derive(Clone, Debug, PartialEq)]
pub struct SlidePlan {
    /// Target canvas.
    pub canvas: Canvas,
    /// Draw ops in paint order.
    pub ops: Vec<DrawOp>,
    /// Text layout, `None` when the slide has no text.
    pub text: Option<TextGeometry>,
}

/// Wrap, measure and place a slide's text. `None` for empty text.
///
/// Wrapping happens once; the same lines and widths size the box and are drawn.
pub fn layout_text<M: TextMeasurer + ?Sized>(
    slide: &Slide,
    ctx: &RenderContext,
    measurer: &mut M,
) -> SlideResult<Option<TextGeometry>> {
    if !slide.has_text() {
        return Ok(None);
    }
    slide.style.validate()?;

    let run_style = TextRunStyle::from_style(&slide.style, ctx.resolution_scale);
    measurer.configure(&run_style)?;

    let text = apply_text_transform(&slide.text, slide.style.text_transform);
    let lines = wrap(&text, measurer, ctx.max_text_width(), ctx.constants.max_lines)?;
    let line_widths = measure_lines(&lines, measurer)?;

    let container = box_from_widths(
        &line_widths,
        run_style.font_size,
        ctx.resolution_scale,
        &ctx.constants,
    );
    let transform = resolve_transform(
        &slide.element,
        ctx.canvas.width_f64(),
        ctx.canvas.height_f64(),
        Some((container.width, container.height)),
    );

    Ok(Some(TextGeometry {
        lines,
        line_widths,
        font_size: run_style.font_size,
        line_height: container.line_height,
        container,
        transform,
    }))
}

/// Scale that makes an `image_w × image_h` image cover the canvas, centered.
pub fn cover_fit(canvas: Canvas, image_w: u32, image_h: u32) -> Affine {
    let (cw, ch) = (canvas.width_f64(), canvas.height_f64());
    let (iw, ih) = (f64::from(image_w), f64::from(image_h));
    let s = (cw / iw).max(ch / ih);
    let offset = Vec2::new((cw - iw * s) / 2.0, (ch - ih * s) / 2.0);
    Affine::translate(offset) * Affine::scale(s)
}

/// Build the full draw plan for one slide.
///
/// Order: background image, then the box (skipped for mode `none` or empty text), then for each
/// line a shadow pass (unless suppressed) followed by the fill pass.
#[tracing::instrument(skip(slide, ctx, measurer), fields(slide_id = %slide.id))]
pub fn compose_slide<M: TextMeasurer + ?Sized>(
    slide: &Slide,
    ctx: &RenderContext,
    measurer: &mut M,
    image_w: u32,
    image_h: u32,
) -> SlideResult<SlidePlan> {
    if image_w == 0 || image_h == 0 {
        return Err(SlideError::validation(format!(
            "slide '{}' image has empty size {image_w}x{image_h}",
            slide.id
        )));
    }

    let mut ops = vec![DrawOp::Image(ImageOp {
        transform: cover_fit(ctx.canvas, image_w, image_h),
        width: image_w,
        height: image_h,
    })];

    let text = layout_text(slide, ctx, measurer)?;
    if let Some(geom) = &text {
        let colors = resolve_colors(&slide.style, ctx.resolution_scale, &ctx.constants);
        let transform = geom.affine();
        let container = &geom.container;

        if !colors.background.is_transparent() {
            let rects = match slide.style.background_mode {
                BackgroundMode::None => Vec::new(),
                BackgroundMode::PerLine => line_boxes(&geom.lines, &geom.line_widths, container),
                BackgroundMode::Half | BackgroundMode::Full | BackgroundMode::White => {
                    vec![container.rect()]
                }
            };
            ops.extend(rects.into_iter().map(|rect| {
                DrawOp::RoundedRect(RectOp {
                    transform,
                    rect,
                    radius: container.radius,
                    color: colors.background,
                })
            }));
        }

        let run_style = TextRunStyle::from_style(&slide.style, ctx.resolution_scale);
        for (i, (line, &width)) in geom.lines.iter().zip(&geom.line_widths).enumerate() {
            if line.is_empty() {
                continue;
            }
            let origin = container.line_origin(i, width);
            let line_op = |origin: Point, color: Rgba8, pass: TextPass| {
                DrawOp::TextLine(TextLineOp {
                    transform,
                    origin,
                    width,
                    slot_height: geom.line_height,
                    text: line.clone(),
                    style: run_style,
                    color,
                    pass,
                })
            };
            if let Some(shadow) = colors.shadow {
                ops.push(line_op(origin + shadow.offset, shadow.color, TextPass::Shadow));
            }
            ops.push(line_op(origin, colors.text, TextPass::Fill));
        }

        tracing::debug!(
            lines = geom.lines.len(),
            box_w = container.width,
            box_h = container.height,
            font_px = geom.font_size,
            "text laid out"
        );
    }

    Ok(SlidePlan {
        canvas: ctx.canvas,
        ops,
        text,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/plan.rs"]
mod tests;
