//! Vertical sizing shared by pagination and rendering.
//!
//! The paginator only ever asks these functions whether a group of points fits; the page
//! renderer walks the same blocks to place text. Both go through [`PageSizer`], so a group the
//! paginator accepts is laid out with exactly the heights it was accepted with.

use crate::{
    foundation::core::Canvas,
    text::{
        fonts::{FontBundle, FontFace},
        metrics::Typesetter,
        wrap::{LayoutLine, wrap, wrap_measured},
    },
};

/// Text measured to get the line height of a face.
pub const LINE_SAMPLE: &str = "Ay";
/// Text measured to get the height of a number label.
pub const NUMBER_SAMPLE: &str = "1.";
/// Vertical gap between title lines.
pub const TITLE_LINE_SPACING: f32 = 20.0;
/// Vertical gap after each point.
pub const POINT_SPACING: f32 = 50.0;
/// Horizontal gap between a number label and its text.
pub const LABEL_GAP: f32 = 20.0;
/// Width taken off the content box for the number label column when wrapping point text.
pub const LABEL_RESERVE: f32 = 50.0;
/// Appended to the last visible line of a clipped point.
pub const ELLIPSIS: &str = "\u{2026}";

/// Wrapped point text and the height it occupies on a page (before [`POINT_SPACING`]).
#[derive(Clone, Debug, PartialEq)]
pub struct PointBlock {
    pub lines: Vec<String>,
    pub line_height: f32,
    pub height: f32,
}

/// Wrapped title lines and their vertical placement.
#[derive(Clone, Debug, PartialEq)]
pub struct TitleBlock {
    pub lines: Vec<LayoutLine>,
    pub line_height: f32,
    pub height: f32,
    pub start_y: f32,
}

/// Canvas geometry plus fonts; everything needed to size a page without drawing it.
#[derive(Clone, Copy, Debug)]
pub struct PageSizer<'a> {
    pub canvas: Canvas,
    pub fonts: &'a FontBundle,
}

impl<'a> PageSizer<'a> {
    pub fn new(canvas: Canvas, fonts: &'a FontBundle) -> Self {
        Self { canvas, fonts }
    }

    pub fn title_wrap_width(&self) -> f32 {
        self.canvas.content_width()
    }

    pub fn point_wrap_width(&self) -> f32 {
        self.canvas.content_width() - LABEL_RESERVE
    }

    pub fn line_height(&self, ts: &mut Typesetter, face: &FontFace) -> f32 {
        ts.height(LINE_SAMPLE, face)
    }

    pub fn number_height(&self, ts: &mut Typesetter) -> f32 {
        ts.height(NUMBER_SAMPLE, &self.fonts.number)
    }

    /// Title lines centered as one block: `n * line_height + (n - 1) * spacing` tall.
    pub fn title_block(&self, ts: &mut Typesetter, title: &str) -> TitleBlock {
        let face = &self.fonts.title;
        let lines = wrap_measured(ts, title, face, self.title_wrap_width());
        let line_height = self.line_height(ts, face);
        let n = lines.len() as f32;
        let height = if lines.is_empty() {
            0.0
        } else {
            n * line_height + (n - 1.0) * TITLE_LINE_SPACING
        };
        let start_y = ((self.canvas.height as f32 - height) / 2.0).floor();
        TitleBlock {
            lines,
            line_height,
            height,
            start_y,
        }
    }

    /// Height of one point: the taller of its number label and its wrapped text.
    pub fn point_block(&self, ts: &mut Typesetter, text: &str) -> PointBlock {
        let face = &self.fonts.point;
        let lines = wrap(ts, text, face, self.point_wrap_width());
        let line_height = self.line_height(ts, face);
        let text_height = lines.len() as f32 * line_height;
        let height = self.number_height(ts).max(text_height);
        PointBlock {
            lines,
            line_height,
            height,
        }
    }

    /// Total page height of `points`: top margin, each block plus spacing, bottom margin.
    pub fn points_height<S: AsRef<str>>(&self, ts: &mut Typesetter, points: &[S]) -> f32 {
        let margin = self.canvas.margin as f32;
        let body: f32 = points
            .iter()
            .map(|p| self.point_block(ts, p.as_ref()).height + POINT_SPACING)
            .sum();
        margin + body + margin
    }

    /// Largest block height a point may have and still fit alone on a page.
    pub fn max_point_height(&self) -> f32 {
        self.canvas.height as f32 - 2.0 * self.canvas.margin as f32 - POINT_SPACING
    }

    /// Drop lines from `block` until it fits [`Self::max_point_height`], ellipsizing the last
    /// kept line. Always keeps at least one line.
    ///
    /// Clipping works in whole lines, so a block can only shrink to one line (or its number
    /// label). When a single line or the label is itself taller than the limit, the block keeps
    /// that one line and still runs past the bottom margin.
    pub fn clip_point_block(&self, ts: &mut Typesetter, mut block: PointBlock) -> PointBlock {
        let limit = self.max_point_height();
        if block.height <= limit {
            return block;
        }
        if block.lines.len() <= 1 {
            tracing::debug!(
                height = block.height,
                limit,
                "point line taller than a page, cannot clip"
            );
            return block;
        }

        let keep = ((limit / block.line_height).floor() as usize).max(1);
        block.lines.truncate(keep);
        if let Some(last) = block.lines.pop() {
            block
                .lines
                .push(self.ellipsize(ts, &last, &self.fonts.point, self.point_wrap_width()));
        }
        block.height = self
            .number_height(ts)
            .max(block.lines.len() as f32 * block.line_height);
        if block.height > limit {
            tracing::debug!(
                height = block.height,
                limit,
                "point clipped to one line, still taller than a page"
            );
        }
        block
    }

    fn ellipsize(&self, ts: &mut Typesetter, line: &str, face: &FontFace, max: f32) -> String {
        let mut words: Vec<&str> = line.split_whitespace().collect();
        loop {
            let candidate = format!("{}{ELLIPSIS}", words.join(" "));
            if words.len() <= 1 || ts.width(&candidate, face) <= max {
                return candidate;
            }
            words.pop();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/sizing.rs"]
mod tests;
