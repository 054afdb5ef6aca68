use super::*;

#[test]
fn parses_css_rgba_with_fractional_alpha() {
    assert_eq!(parse_color("rgba(0,0,0,0.4)").unwrap(), Rgba8::new(0, 0, 0, 102));
    assert_eq!(parse_color("rgba(0, 0, 0, 0.7)").unwrap(), Rgba8::new(0, 0, 0, 179));
    assert_eq!(
        parse_color("rgba(255,255,255,0.9)").unwrap(),
        Rgba8::new(255, 255, 255, 230)
    );
    assert_eq!(parse_color("rgb(10, 20, 30)").unwrap(), Rgba8::new(10, 20, 30, 255));
}

#[test]
fn parses_hex_and_names() {
    assert_eq!(parse_color("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(parse_color("#FF3366").unwrap(), Rgba8::new(255, 51, 102, 255));
    assert_eq!(parse_color("#ff336680").unwrap(), Rgba8::new(255, 51, 102, 128));
    assert_eq!(parse_color(" transparent ").unwrap(), Rgba8::TRANSPARENT);
    assert_eq!(parse_color("Black").unwrap(), Rgba8::BLACK);
}

#[test]
fn rejects_malformed_colors() {
    assert!(parse_color("#12345").is_err());
    assert!(parse_color("rgba(0,0,0").is_err());
    assert!(parse_color("rgba(0,0)").is_err());
    assert!(parse_color("chartreuse").is_err());
}

#[test]
fn serde_accepts_strings_and_objects() {
    let c: Rgba8 = serde_json::from_str("\"#00000066\"").unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 0, 0x66));

    let c: Rgba8 = serde_json::from_str(r#"{"r":1,"g":2,"b":3,"a":0.5}"#).unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 128));

    let s = serde_json::to_string(&Rgba8::new(1, 2, 3, 4)).unwrap();
    assert_eq!(s, "\"#01020304\"");
}

#[test]
fn premultiplies_channels() {
    assert_eq!(Rgba8::new(255, 255, 255, 128).to_premul(), [128, 128, 128, 128]);
    assert_eq!(Rgba8::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
}
