use super::*;

#[test]
fn defaults_match_design_values() {
    let c = StyleConstants::default();
    assert_eq!((c.padding_h, c.padding_v, c.radius), (16.0, 8.0, 8.0));
    assert_eq!(c.line_height, 1.2);
    assert_eq!(c.shadow_offset, 1.0);
    assert_eq!(c.max_lines, 0);
    assert_eq!(c.shadow_color, Rgba8::new(0, 0, 0, 204));
    c.validate().unwrap();
}

#[test]
fn partial_json_overrides_keep_other_defaults() {
    let c: StyleConstants = serde_json::from_str(r#"{"maxLines": 3, "paddingH": 20}"#).unwrap();
    assert_eq!(c.max_lines, 3);
    assert_eq!(c.padding_h, 20.0);
    assert_eq!(c.padding_v, 8.0);
}

#[test]
fn validate_rejects_bad_values() {
    let c = StyleConstants {
        line_height: 0.0,
        ..StyleConstants::default()
    };
    assert!(c.validate().is_err());

    let c = StyleConstants {
        padding_v: -1.0,
        ..StyleConstants::default()
    };
    assert!(c.validate().is_err());

    let c = StyleConstants {
        max_text_width_ratio: 1.5,
        ..StyleConstants::default()
    };
    assert!(c.validate().is_err());
}
