use std::{collections::HashMap, sync::Arc};

use image::RgbaImage;

use crate::{
    foundation::core::Rgb8,
    text::{
        fonts::FontFace,
        metrics::{LineInk, ShapedLine},
    },
};

/// One shaped line placed on a page: top-left of its box at (`x`, `y`).
#[derive(Clone, Debug)]
pub struct TextDraw {
    pub face: FontFace,
    pub line: ShapedLine,
    pub x: f32,
    pub y: f32,
    pub color: Rgb8,
}

/// CPU rasterizer for pages.
///
/// Keeps decoded glyph fonts across pages, so each render worker owns one.
#[derive(Default)]
pub struct Painter {
    font_cache: HashMap<u64, vello_cpu::peniko::FontData>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `ops` in order over an opaque background and read the page back as RGBA8.
    pub fn paint(&mut self, background: &RgbaImage, ops: &[TextDraw]) -> RgbaImage {
        let (width, height) = background.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            tracing::warn!(width, height, "page exceeds rasterizer limits, text not drawn");
            return background.clone();
        };

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(rgba_to_pixmap(background, w, h))),
            // Drawn 1:1, so nearest sampling keeps background pixels exact.
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::Low,
                ..Default::default()
            },
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        for op in ops {
            self.draw_text(&mut ctx, op);
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);

        let data = pixmap.data_as_u8_slice().to_vec();
        RgbaImage::from_raw(width, height, data).unwrap_or_else(|| {
            tracing::warn!(width, height, "rasterizer readback size mismatch");
            background.clone()
        })
    }

    fn draw_text(&mut self, ctx: &mut vello_cpu::RenderContext, op: &TextDraw) {
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(op.x),
            f64::from(op.y),
        )));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            op.color.r, op.color.g, op.color.b, 255,
        ));

        match &op.line.ink {
            LineInk::Glyphs { glyphs, font_size } => {
                let Some(font) = self.font_for(&op.face) else {
                    return;
                };
                ctx.glyph_run(&font)
                    .font_size(*font_size)
                    .fill_glyphs(glyphs.iter().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    }));
            }
            LineInk::Blocks(blocks) => {
                for b in blocks {
                    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(b.x0, b.y0, b.x1, b.y1));
                }
            }
        }
    }

    fn font_for(&mut self, face: &FontFace) -> Option<vello_cpu::peniko::FontData> {
        let outline = face.outline()?;
        if let Some(font) = self.font_cache.get(&outline.id) {
            return Some(font.clone());
        }

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(outline.bytes.as_ref().clone()),
            0,
        );
        self.font_cache.insert(outline.id, font.clone());
        Some(font)
    }
}

fn rgba_to_pixmap(img: &RgbaImage, w: u16, h: u16) -> vello_cpu::Pixmap {
    let mut may_have_opacities = false;
    let pixels: Vec<_> = img
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            may_have_opacities |= a != 255;
            let premul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
            vello_cpu::peniko::color::PremulRgba8 {
                r: premul(r),
                g: premul(g),
                b: premul(b),
                a,
            }
        })
        .collect();

    vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities)
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
