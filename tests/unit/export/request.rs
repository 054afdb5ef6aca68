use super::*;

fn request() -> ExportRequest {
    ExportRequest::new(
        "owner-1",
        "show_1",
        vec![
            Slide::new("c", 2, "images/c.png"),
            Slide::new("a", 0, "images/a.png"),
            Slide::new("b", 1, "images/b.png"),
        ],
    )
}

#[test]
fn valid_request_orders_by_position() {
    let req = request();
    req.validate().unwrap();
    let ids = req
        .ordered_slides()
        .iter()
        .map(|s| s.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn rejects_empty_slide_list() {
    let req = ExportRequest::new("o", "s", Vec::new());
    assert!(matches!(req.validate(), Err(SlideError::Validation(_))));
}

#[test]
fn rejects_duplicate_positions_and_ids() {
    let mut req = request();
    req.slides[0].position = 0;
    assert!(req.validate().unwrap_err().to_string().contains("position"));

    let mut req = request();
    req.slides[0].id = "a".to_owned();
    assert!(req.validate().unwrap_err().to_string().contains("duplicate slide id"));
}

#[test]
fn rejects_unsafe_key_segments() {
    for bad in ["", "..", "a/b", "a b"] {
        let mut req = request();
        req.owner_id = bad.to_owned();
        assert!(req.validate().is_err(), "owner {bad:?} accepted");
    }
    let mut req = request();
    req.slides[1].id = "../x".to_owned();
    assert!(req.validate().is_err());
}

#[test]
fn rejects_missing_image_reference() {
    let mut req = request();
    req.slides[2].image = String::new();
    assert!(req.validate().is_err());
}

#[test]
fn parses_camel_case_json() {
    let json = r#"{
        "ownerId": "u1",
        "slideshowId": "s1",
        "slides": [{"id": "x", "position": 0, "image": "img/x.jpg", "text": "hello"}]
    }"#;
    let req = ExportRequest::from_reader(json.as_bytes()).unwrap();
    assert_eq!(req.owner_id, "u1");
    assert_eq!(req.slideshow_id, "s1");
    assert_eq!(req.slides[0].text, "hello");
    req.validate().unwrap();
}

#[test]
fn upload_key_has_no_extension() {
    assert_eq!(
        upload_key("u1", "s1", "x", 1_700_000_000_000),
        "rendered/u1/s1/x-1700000000000"
    );
}
