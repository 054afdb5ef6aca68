use crate::{
    assets::decode::PreparedImage,
    compose::plan::{DrawOp, ImageOp, RectOp, SlidePlan, TextLineOp},
    foundation::{
        core::Canvas,
        error::{SlideError, SlideResult},
    },
    render::backend::FrameRGBA,
};

/// Primitive operations a rasterizer has to provide to execute a [`SlidePlan`].
pub trait PassBackend {
    /// Start a frame of the given size.
    fn begin(&mut self, canvas: Canvas) -> SlideResult<()>;

    /// Paint `image` under the op's cover-fit transform.
    fn draw_image(&mut self, op: &ImageOp, image: &PreparedImage) -> SlideResult<()>;

    /// Fill a rounded rect in container-local space.
    fn fill_rounded_rect(&mut self, op: &RectOp) -> SlideResult<()>;

    /// Draw one text line pass.
    fn draw_text_line(&mut self, op: &TextLineOp) -> SlideResult<()>;

    /// Finish the frame and read it back.
    fn finish(&mut self) -> SlideResult<FrameRGBA>;
}

/// Run every op of `plan` in order against `backend`.
pub fn execute_plan<B: PassBackend + ?Sized>(
    backend: &mut B,
    plan: &SlidePlan,
    image: &PreparedImage,
) -> SlideResult<FrameRGBA> {
    backend.begin(plan.canvas)?;

    for op in &plan.ops {
        match op {
            DrawOp::Image(op) => {
                if op.width != image.width || op.height != image.height {
                    return Err(SlideError::render(format!(
                        "plan expects a {}x{} image, got {}x{}",
                        op.width, op.height, image.width, image.height
                    )));
                }
                backend.draw_image(op, image)?
            }
            DrawOp::RoundedRect(op) => backend.fill_rounded_rect(op)?,
            DrawOp::TextLine(op) => backend.draw_text_line(op)?,
        }
    }

    backend.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;
