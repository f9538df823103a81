use crate::text::{fonts::FontFace, metrics::Typesetter};

/// A wrapped line and its measured size.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutLine {
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// Greedily pack the words of `text` into lines no wider than `max_width_px`.
///
/// A word wider than the limit is emitted alone on its own line. Empty or whitespace-only text
/// produces no lines.
pub fn wrap(ts: &mut Typesetter, text: &str, face: &FontFace, max_width_px: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        if ts.width(&candidate, face) <= max_width_px {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// [`wrap`], keeping each line's measured size.
pub fn wrap_measured(
    ts: &mut Typesetter,
    text: &str,
    face: &FontFace,
    max_width_px: f32,
) -> Vec<LayoutLine> {
    wrap(ts, text, face, max_width_px)
        .into_iter()
        .map(|line| {
            let b = ts.measure(&line, face);
            LayoutLine {
                text: line,
                width: b.width() as f32,
                height: b.height() as f32,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
