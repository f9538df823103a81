use super::*;

#[test]
fn input_accepts_points_or_notes() {
    let a = CarouselInput::from_json_str(r#"{"title": "T", "points": ["x", "y"]}"#).unwrap();
    let b = CarouselInput::from_json_str(r#"{"title": "T", "notes": ["x", "y"]}"#).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, CarouselInput::new("T", ["x", "y"]));
}

#[test]
fn missing_fields_default() {
    let input = CarouselInput::from_json_str("{}").unwrap();
    assert_eq!(input.title, UNTITLED);
    assert!(input.points.is_empty());
}

#[test]
fn null_fields_default() {
    let input = CarouselInput::from_json_str(r#"{"title": null, "points": ["a"]}"#).unwrap();
    assert_eq!(input.title, UNTITLED);
    assert_eq!(input.display_title(), UNTITLED);
    assert_eq!(input.points, ["a"]);

    let input = CarouselInput::from_json_str(r#"{"title": "T", "notes": null}"#).unwrap();
    assert_eq!(input.title, "T");
    assert!(input.points.is_empty());
}

#[test]
fn non_string_title_is_a_serde_error() {
    let err = CarouselInput::from_json_str(r#"{"title": 7}"#).unwrap_err();
    assert!(matches!(err, crate::CarouselError::Serde(_)));
}

#[test]
fn blank_title_displays_as_untitled() {
    assert_eq!(CarouselInput::new("  ", Vec::<String>::new()).display_title(), UNTITLED);
    assert_eq!(CarouselInput::new("Hi", Vec::<String>::new()).display_title(), "Hi");
}

#[test]
fn wrong_shapes_are_serde_errors() {
    let err = CarouselInput::from_json_str(r#"{"points": "not a list"}"#).unwrap_err();
    assert!(matches!(err, crate::CarouselError::Serde(_)));
}

#[test]
fn page_file_names_are_zero_padded() {
    let page = |index| RenderedPage {
        index,
        pixels: RgbaImage::new(1, 1),
    };
    assert_eq!(page(0).file_name(), "page_01.png");
    assert_eq!(page(8).file_name(), "page_09.png");
    assert_eq!(page(122).file_name(), "page_123.png");
}
