use std::collections::HashMap;

use crate::{
    foundation::core::{BoundingBox, Rect},
    text::fonts::{FontFace, register_family},
};

/// Brush type threaded through Parley layouts. Color is applied at paint time, so it is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoBrush;

/// Positioned glyph of a shaped line, relative to the line's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedGlyph {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

/// Paintable form of one shaped line.
#[derive(Clone, Debug, PartialEq)]
pub enum LineInk {
    /// Outline glyphs at `font_size`, drawn with the face's font data.
    Glyphs {
        glyphs: Vec<PlacedGlyph>,
        font_size: f32,
    },
    /// Filled boxes of the built-in face.
    Blocks(Vec<Rect>),
}

/// A single shaped line: its box (origin at the top-left) and what to paint.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapedLine {
    pub bounds: BoundingBox,
    pub ink: LineInk,
}

/// Shaping and measurement scratch.
///
/// Holds Parley's mutable contexts, so each render worker owns one. Every outline face gets its
/// own font context, registered the first time the face is measured, so faces that share a family
/// name never shadow each other. Results depend only on (text, face).
pub struct Typesetter {
    font_ctxs: HashMap<u64, parley::FontContext>,
    layout_ctx: parley::LayoutContext<NoBrush>,
}

impl Default for Typesetter {
    fn default() -> Self {
        Self::new()
    }
}

impl Typesetter {
    pub fn new() -> Self {
        Self {
            font_ctxs: HashMap::new(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Bounding box of `text` set on a single line in `face`.
    pub fn measure(&mut self, text: &str, face: &FontFace) -> BoundingBox {
        self.shape(text, face, false).bounds
    }

    pub fn width(&mut self, text: &str, face: &FontFace) -> f32 {
        self.measure(text, face).width() as f32
    }

    pub fn height(&mut self, text: &str, face: &FontFace) -> f32 {
        self.measure(text, face).height() as f32
    }

    /// Shape `text` on one line, keeping the glyphs for painting.
    pub fn shape_line(&mut self, text: &str, face: &FontFace) -> ShapedLine {
        self.shape(text, face, true)
    }

    fn shape(&mut self, text: &str, face: &FontFace, keep_ink: bool) -> ShapedLine {
        if text.is_empty() {
            return ShapedLine {
                bounds: Rect::ZERO,
                ink: LineInk::Blocks(Vec::new()),
            };
        }

        let Some(outline) = face.outline() else {
            return builtin::shape(text, face.size_px(), keep_ink);
        };

        if !self.font_ctxs.contains_key(&outline.id) {
            let mut font_ctx = parley::FontContext::default();
            if let Err(e) = register_family(&mut font_ctx, outline.bytes) {
                tracing::warn!(
                    family = outline.family,
                    error = %e,
                    "font registration failed, using built-in metrics"
                );
                return builtin::shape(text, face.size_px(), keep_ink);
            }
            self.font_ctxs.insert(outline.id, font_ctx);
        }
        let Some(font_ctx) = self.font_ctxs.get_mut(&outline.id) else {
            return builtin::shape(text, face.size_px(), keep_ink);
        };

        let mut builder = self.layout_ctx.ranged_builder(font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(outline.family.to_string())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(face.size_px()));
        builder.push_default(parley::style::StyleProperty::Brush(NoBrush));

        let mut layout: parley::Layout<NoBrush> = builder.build(text);
        layout.break_all_lines(None);

        let Some(line) = layout.lines().next() else {
            return ShapedLine {
                bounds: Rect::ZERO,
                ink: LineInk::Blocks(Vec::new()),
            };
        };
        let metrics = line.metrics();
        let ascent = metrics.ascent;
        let height = metrics.ascent + metrics.descent;
        let bounds = Rect::new(0.0, 0.0, f64::from(layout.width()), f64::from(height));

        let mut glyphs = Vec::new();
        if keep_ink {
            // Positioned glyph y sits on the baseline in layout space; rebase so the line box
            // starts at 0.
            let rebase = ascent - metrics.baseline;
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x,
                    y: g.y + rebase,
                }));
            }
        }

        ShapedLine {
            bounds,
            ink: LineInk::Glyphs {
                glyphs,
                font_size: face.size_px(),
            },
        }
    }
}

/// Fixed metrics of the built-in face, in multiples of the font size.
mod builtin {
    use super::{LineInk, ShapedLine};
    use crate::foundation::core::Rect;

    pub(super) const ADVANCE: f64 = 0.6;
    pub(super) const ASCENT: f64 = 0.8;
    pub(super) const DESCENT: f64 = 0.2;

    pub(super) fn shape(text: &str, size_px: f32, keep_ink: bool) -> ShapedLine {
        let size = f64::from(size_px);
        let advance = ADVANCE * size;
        let count = text.chars().count();
        let trailing = text.chars().rev().take_while(|c| c.is_whitespace()).count();
        let width = (count - trailing) as f64 * advance;
        let bounds = Rect::new(0.0, 0.0, width, (ASCENT + DESCENT) * size);

        let mut blocks = Vec::new();
        if keep_ink {
            for (i, c) in text.chars().enumerate() {
                if c.is_whitespace() {
                    continue;
                }
                let top = if c.is_uppercase() || c.is_ascii_digit() {
                    0.1
                } else {
                    0.35
                };
                let x = i as f64 * advance;
                blocks.push(Rect::new(
                    x + 0.1 * advance,
                    top * size,
                    x + 0.9 * advance,
                    ASCENT * size,
                ));
            }
        }

        ShapedLine {
            bounds,
            ink: LineInk::Blocks(blocks),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
