use super::*;

#[test]
fn default_canvas_is_portrait_nine_by_sixteen() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height, c.margin), (1080, 1920, 100));
    assert!((c.aspect_ratio() - 9.0 / 16.0).abs() < 1e-9);
    assert_eq!(c.content_width(), 880.0);
    assert_eq!(c.content_bottom(), 1820.0);
}

#[test]
fn canvas_rejects_degenerate_sizes() {
    assert!(Canvas::new(0, 10, 0).is_err());
    assert!(Canvas::new(70_000, 10, 0).is_err());
    assert!(Canvas::new(100, 100, 50).is_err());
    assert!(Canvas::new(100, 100, 49).is_ok());
}

#[test]
fn rgb8_parses_hex_and_triplets() {
    assert_eq!("#2d3436".parse::<Rgb8>().unwrap(), Rgb8::new(45, 52, 54));
    assert_eq!("ffffff".parse::<Rgb8>().unwrap(), Rgb8::WHITE);
    assert_eq!("99, 110, 114".parse::<Rgb8>().unwrap(), Rgb8::new(99, 110, 114));
    assert!("1,2".parse::<Rgb8>().is_err());
    assert!("#12345".parse::<Rgb8>().is_err());
    assert!("300,0,0".parse::<Rgb8>().is_err());
}

#[test]
fn rgb8_serializes_as_array() {
    let json = serde_json::to_string(&Rgb8::new(1, 2, 3)).unwrap();
    assert_eq!(json, "[1,2,3]");
    let back: Rgb8 = serde_json::from_str("[4,5,6]").unwrap();
    assert_eq!(back, Rgb8::new(4, 5, 6));
}

#[test]
fn shadow_is_opposite_of_tone() {
    assert_eq!(TextTone::Light.shadow(), Rgb8::BLACK);
    assert_eq!(TextTone::Dark.shadow(), Rgb8::WHITE);
}
