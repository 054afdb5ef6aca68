use super::*;
use crate::{
    foundation::{color::Rgba8, core::Canvas, error::SlideError},
    style::constants::StyleConstants,
};

fn ctx() -> RenderContext {
    RenderContext::new(Canvas::new(8, 8).unwrap(), 8.0, StyleConstants::default()).unwrap()
}

#[test]
fn renders_text_free_slide_without_font() {
    let image = PreparedImage::solid(4, 4, Rgba8::new(0, 0, 255, 255)).unwrap();
    let slide = Slide::new("s", 0, "img");

    let frame = CpuSlideRenderer::without_font()
        .render(&slide, &image, &ctx())
        .unwrap();
    assert_eq!((frame.width, frame.height), (8, 8));
    let px = frame.pixel(4, 4).unwrap();
    assert!(px[2] >= 254 && px[3] >= 254, "{px:?}");
}

#[test]
fn text_needs_a_font_to_render() {
    let image = PreparedImage::solid(4, 4, Rgba8::WHITE).unwrap();
    let slide = Slide::new("s", 0, "img").with_text("hello");

    let renderer = CpuSlideRenderer::without_font();
    let plan = renderer.plan(&slide, &ctx(), 4, 4).unwrap();
    assert!(plan.text.is_some());

    let err = renderer.render(&slide, &image, &ctx()).unwrap_err();
    assert!(matches!(err, SlideError::Render(_)));
}
