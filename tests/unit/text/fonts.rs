use super::*;

#[test]
fn missing_files_fall_back_to_builtin_at_first_size() {
    let title = [
        FontCandidate::file("no/such/font.otf", 72.0),
        FontCandidate::file("also/missing.ttf", 64.0),
    ];
    let bundle = FontBundle::load(&title, &[], &[], Path::new("target"));

    assert!(bundle.title.is_builtin());
    assert_eq!(bundle.title.size_px(), 72.0);
    assert!(bundle.number.is_builtin());
    assert_eq!(bundle.number.size_px(), FontBundle::DEFAULT_BUILTIN_SIZE);
}

#[test]
fn garbage_bytes_are_not_a_font() {
    assert!(FontFace::from_bytes(b"definitely not a font".to_vec(), 20.0).is_err());
    assert!(FontFace::from_bytes(Vec::new(), 0.0).is_err());
}

#[test]
fn builtin_bundle_uses_role_sizes() {
    let bundle = FontBundle::builtin();
    assert_eq!(bundle.get(FontRole::Title).size_px(), 72.0);
    assert_eq!(bundle.get(FontRole::Number).size_px(), 34.0);
    assert_eq!(bundle.get(FontRole::Point).size_px(), 38.0);
    assert_eq!(bundle.title.family(), "builtin");
}

#[test]
fn builtin_face_sanitizes_size() {
    assert_eq!(
        FontFace::builtin(f32::NAN).size_px(),
        FontBundle::DEFAULT_BUILTIN_SIZE
    );
}

#[test]
fn font_source_json_shape() {
    let c: FontCandidate =
        serde_json::from_str(r#"{"source":{"kind":"system","family":"serif"},"size_px":40}"#)
            .unwrap();
    assert_eq!(c, FontCandidate::system("serif", 40.0));

    let c: FontCandidate =
        serde_json::from_str(r#"{"source":{"kind":"file","path":"fonts/a.otf"},"size_px":38}"#)
            .unwrap();
    assert_eq!(c, FontCandidate::file("fonts/a.otf", 38.0));
}
