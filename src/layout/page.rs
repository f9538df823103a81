use std::path::Path;

use image::RgbaImage;

use crate::{
    background::{
        contrast::choose_text_tone,
        render::{BackgroundSpec, render_background},
    },
    foundation::core::{Canvas, Rgb8, TextTone},
    layout::sizing::{LABEL_GAP, POINT_SPACING, PageSizer, TITLE_LINE_SPACING},
    render::painter::{Painter, TextDraw},
    text::{fonts::FontBundle, metrics::Typesetter},
};

/// Shadow offset under title text on image backgrounds.
pub const TITLE_SHADOW_OFFSET: f32 = 2.0;
/// Shadow offset under point text on image backgrounds.
pub const POINT_SHADOW_OFFSET: f32 = 1.0;

/// Colors used when painting pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Solid fill used when an image background cannot be loaded.
    pub default_background: Rgb8,
    /// Text color on dark backgrounds.
    pub light_text: Rgb8,
    /// Text color on light backgrounds.
    pub dark_text: Rgb8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default_background: Rgb8::WHITE,
            light_text: Rgb8::WHITE,
            dark_text: Rgb8::new(30, 30, 30),
        }
    }
}

impl Palette {
    pub fn text(&self, tone: TextTone) -> Rgb8 {
        match tone {
            TextTone::Light => self.light_text,
            TextTone::Dark => self.dark_text,
        }
    }
}

/// Draws title and points pages.
///
/// Owns the per-worker shaping and raster scratch; fonts and geometry are shared read-only.
pub struct PageRenderer<'a> {
    sizer: PageSizer<'a>,
    palette: Palette,
    asset_root: &'a Path,
    ts: Typesetter,
    painter: Painter,
}

/// Background plus chosen text color for one page.
struct Backdrop {
    pixels: RgbaImage,
    color: Rgb8,
    shadow: Option<Rgb8>,
}

impl<'a> PageRenderer<'a> {
    pub fn new(canvas: Canvas, fonts: &'a FontBundle, palette: Palette, asset_root: &'a Path) -> Self {
        Self {
            sizer: PageSizer::new(canvas, fonts),
            palette,
            asset_root,
            ts: Typesetter::new(),
            painter: Painter::new(),
        }
    }

    /// Title wrapped to the content width and centered as a block, both axes.
    pub fn title_page(&mut self, title: &str, background: &BackgroundSpec) -> RgbaImage {
        let backdrop = self.backdrop(background);
        let canvas = self.sizer.canvas;
        let face = &self.sizer.fonts.title;
        let block = self.sizer.title_block(&mut self.ts, title);

        let mut ops = Vec::with_capacity(block.lines.len() * 2);
        let mut y = block.start_y;
        for line in &block.lines {
            let x = ((canvas.width as f32 - line.width) / 2.0).floor();
            let shaped = self.ts.shape_line(&line.text, face);
            push_text(
                &mut ops,
                TextDraw {
                    face: face.clone(),
                    line: shaped,
                    x,
                    y,
                    color: backdrop.color,
                },
                backdrop.shadow,
                TITLE_SHADOW_OFFSET,
            );
            y += block.line_height + TITLE_LINE_SPACING;
        }

        self.painter.paint(&backdrop.pixels, &ops)
    }

    /// Numbered points stacked from the top margin; numbering starts at `start_number`.
    ///
    /// Groups are expected to fit (see the paginator); a block taller than a whole page is
    /// clipped to the page and ellipsized.
    pub fn points_page<S: AsRef<str>>(
        &mut self,
        points: &[S],
        start_number: usize,
        background: &BackgroundSpec,
    ) -> RgbaImage {
        let backdrop = self.backdrop(background);
        let margin = self.sizer.canvas.margin as f32;
        let number_face = &self.sizer.fonts.number;
        let point_face = &self.sizer.fonts.point;

        let mut ops = Vec::new();
        let mut current_y = margin;
        for (i, point) in points.iter().enumerate() {
            let label = self.ts.shape_line(&(start_number + i).to_string(), number_face);
            let text_x = margin + label.bounds.width() as f32 + LABEL_GAP;
            push_text(
                &mut ops,
                TextDraw {
                    face: number_face.clone(),
                    line: label,
                    x: margin,
                    y: current_y,
                    color: backdrop.color,
                },
                None,
                POINT_SHADOW_OFFSET,
            );

            let block = self.sizer.point_block(&mut self.ts, point.as_ref());
            let block = self.sizer.clip_point_block(&mut self.ts, block);
            for (j, line) in block.lines.iter().enumerate() {
                let shaped = self.ts.shape_line(line, point_face);
                push_text(
                    &mut ops,
                    TextDraw {
                        face: point_face.clone(),
                        line: shaped,
                        x: text_x,
                        y: current_y + j as f32 * block.line_height,
                        color: backdrop.color,
                    },
                    backdrop.shadow,
                    POINT_SHADOW_OFFSET,
                );
            }

            current_y += block.height + POINT_SPACING;
        }

        self.painter.paint(&backdrop.pixels, &ops)
    }

    fn backdrop(&self, spec: &BackgroundSpec) -> Backdrop {
        let bg = render_background(
            self.sizer.canvas,
            spec,
            self.asset_root,
            self.palette.default_background,
        );
        let tone = choose_text_tone(&bg.pixels);
        Backdrop {
            color: self.palette.text(tone),
            shadow: bg.is_image.then(|| tone.shadow()),
            pixels: bg.pixels,
        }
    }
}

fn push_text(ops: &mut Vec<TextDraw>, main: TextDraw, shadow: Option<Rgb8>, offset: f32) {
    if let Some(color) = shadow {
        ops.push(TextDraw {
            x: main.x + offset,
            y: main.y + offset,
            color,
            ..main.clone()
        });
    }
    ops.push(main);
}

#[cfg(test)]
#[path = "../../tests/unit/layout/page.rs"]
mod tests;
