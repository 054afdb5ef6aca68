use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SlideError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SlideError::measure("x")
            .to_string()
            .contains("measurement error:")
    );
    assert!(SlideError::render("x").to_string().contains("render error:"));
    assert!(
        SlideError::transport("x")
            .to_string()
            .contains("transport error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn slide_failure_names_index_and_id() {
    let err = ExportError::Slide {
        index: 1,
        slide_id: "s2".to_string(),
        source: SlideError::transport("404"),
    };
    let msg = err.to_string();
    assert!(msg.contains("slide 1"));
    assert!(msg.contains("'s2'"));
    assert!(msg.contains("404"));
    assert_eq!(err.slide_index(), Some(1));
    assert_eq!(err.slide_id(), Some("s2"));

    let input = ExportError::Input(SlideError::validation("no slides"));
    assert_eq!(input.slide_index(), None);
    assert_eq!(input.slide_id(), None);
}
