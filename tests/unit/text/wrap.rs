use super::*;

fn face() -> FontFace {
    // 6px advance per character.
    FontFace::builtin(10.0)
}

#[test]
fn packs_words_greedily() {
    let mut ts = Typesetter::new();
    let lines = wrap(&mut ts, "aa bb cc", &face(), 30.0);
    assert_eq!(lines, vec!["aa bb".to_string(), "cc".to_string()]);
}

#[test]
fn overlong_word_sits_alone() {
    let mut ts = Typesetter::new();
    let lines = wrap(&mut ts, "a enormousword b", &face(), 30.0);
    assert_eq!(lines, vec!["a", "enormousword", "b"]);
}

#[test]
fn empty_and_blank_text_yield_no_lines() {
    let mut ts = Typesetter::new();
    assert!(wrap(&mut ts, "", &face(), 100.0).is_empty());
    assert!(wrap(&mut ts, "   \n\t ", &face(), 100.0).is_empty());
}

#[test]
fn collapses_runs_of_whitespace() {
    let mut ts = Typesetter::new();
    let lines = wrap(&mut ts, "  one \n two   three ", &face(), 1000.0);
    assert_eq!(lines, vec!["one two three"]);
}

fn dejavu(size_px: f32) -> FontFace {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf");
    FontFace::from_bytes(std::fs::read(path).unwrap(), size_px).unwrap()
}

fn assert_lines_fit_and_keep_words(face: &FontFace) {
    let texts = [
        "The quick brown fox jumps over the lazy dog",
        "Short",
        "Every point should wrap into lines that never exceed the configured width of the page",
        "a bb ccc dddd eeeee ffffff ggggggg hhhhhhhh",
        "WAVE AVAIL Tokyo, office; iii mmm",
    ];
    let mut ts = Typesetter::new();

    for text in texts {
        let widest = text
            .split_whitespace()
            .map(|w| ts.width(w, face))
            .fold(0.0f32, f32::max);
        for extra in [0.0, 7.0, 31.0, 200.0] {
            let max = widest + extra;
            let lines = wrap(&mut ts, text, face, max);
            for line in &lines {
                assert!(ts.width(line, face) <= max, "{line:?} wider than {max}");
            }
            let rejoined = lines.join(" ");
            let original: Vec<&str> = text.split_whitespace().collect();
            let produced: Vec<&str> = rejoined.split_whitespace().collect();
            assert_eq!(produced, original);
        }
    }
}

#[test]
fn lines_fit_and_preserve_word_sequence() {
    assert_lines_fit_and_keep_words(&face());
}

#[test]
fn outline_lines_fit_and_preserve_word_sequence() {
    assert_lines_fit_and_keep_words(&dejavu(38.0));
}

#[test]
fn outline_wrap_breaks_a_long_point() {
    let mut ts = Typesetter::new();
    let face = dejavu(38.0);
    let text = "Every point should wrap into lines that never exceed the page width";
    let lines = wrap_measured(&mut ts, text, &face, 400.0);
    assert!(lines.len() > 1);
    for line in &lines {
        assert!(line.width > 0.0 && line.width <= 400.0);
        assert!(line.height > 0.0);
    }
}

#[test]
fn measured_lines_carry_sizes() {
    let mut ts = Typesetter::new();
    let lines = wrap_measured(&mut ts, "aa bb cc", &face(), 30.0);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "aa bb");
    assert!((lines[0].width - 30.0).abs() < 1e-4);
    assert!((lines[1].width - 12.0).abs() < 1e-4);
    assert!((lines[0].height - 10.0).abs() < 1e-4);
}
