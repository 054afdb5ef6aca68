use super::*;

fn style(mode: BackgroundMode) -> TextStyle {
    TextStyle {
        background_mode: mode,
        ..TextStyle::default()
    }
}

#[test]
fn mode_table() {
    let c = StyleConstants::default();
    let bg = |m| resolve_colors(&style(m), 1.0, &c).background;
    assert_eq!(bg(BackgroundMode::None), Rgba8::TRANSPARENT);
    assert_eq!(bg(BackgroundMode::Half), Rgba8::new(0, 0, 0, 102));
    assert_eq!(bg(BackgroundMode::Full), Rgba8::new(0, 0, 0, 179));
    assert_eq!(bg(BackgroundMode::White), Rgba8::new(255, 255, 255, 230));
    assert_eq!(bg(BackgroundMode::PerLine), Rgba8::new(0, 0, 0, 179));
}

#[test]
fn shadow_suppressed_only_for_white() {
    let c = StyleConstants::default();
    for m in [
        BackgroundMode::None,
        BackgroundMode::Half,
        BackgroundMode::Full,
        BackgroundMode::PerLine,
    ] {
        let s = resolve_colors(&style(m), 2.0, &c).shadow.unwrap();
        assert_eq!(s.offset, Vec2::new(2.0, 2.0));
        assert_eq!(s.color, Rgba8::new(0, 0, 0, 204));
    }
    assert!(resolve_colors(&style(BackgroundMode::White), 2.0, &c).shadow.is_none());
}

#[test]
fn explicit_background_color_overrides_except_none() {
    let c = StyleConstants::default();
    let red = Rgba8::new(255, 0, 0, 255);
    let mut s = style(BackgroundMode::Half);
    s.background_color = Some(red);
    assert_eq!(resolve_colors(&s, 1.0, &c).background, red);

    s.background_mode = BackgroundMode::None;
    assert_eq!(resolve_colors(&s, 1.0, &c).background, Rgba8::TRANSPARENT);
}

#[test]
fn text_color_passes_through() {
    let c = StyleConstants::default();
    assert_eq!(resolve_colors(&TextStyle::default(), 1.0, &c).text, Rgba8::WHITE);
    let mut s = TextStyle::default();
    s.color = Rgba8::new(1, 2, 3, 255);
    assert_eq!(resolve_colors(&s, 1.0, &c).text, Rgba8::new(1, 2, 3, 255));
}
