use super::*;

// Font-dependent checks only run when SLIDETEXT_TEST_FONT points at a TTF/OTF file.
fn test_font() -> Option<FontFace> {
    let path = std::env::var_os("SLIDETEXT_TEST_FONT")?;
    Some(FontFace::from_path(path).unwrap())
}

#[test]
fn rejects_bytes_that_are_not_a_font() {
    assert!(FontFace::from_bytes(b"definitely not a font".to_vec()).is_err());
    assert!(FontFace::from_path("/nonexistent/font.ttf").is_err());
}

#[test]
fn parley_widths_are_monotonic_and_deterministic() {
    let Some(face) = test_font() else {
        return;
    };
    let mut m = ParleyMeasurer::new(&face).unwrap();
    m.configure(&TextRunStyle {
        font_size: 48.0,
        ..TextRunStyle::default()
    })
    .unwrap();

    let a = m.measure("Hello").unwrap();
    let b = m.measure("Hello World").unwrap();
    assert!(a > 0.0);
    assert!(b > a);
    assert_eq!(m.measure("Hello World").unwrap(), b);
    assert_eq!(m.measure("").unwrap(), 0.0);

    m.configure(&TextRunStyle {
        font_size: 96.0,
        ..TextRunStyle::default()
    })
    .unwrap();
    let doubled = m.measure("Hello").unwrap();
    assert!((doubled - 2.0 * a).abs() < 1.0);
}
