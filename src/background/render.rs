use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::{
    core::{Canvas, Rgb8},
    error::{CarouselError, CarouselResult},
};

/// How to paint a page's background.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackgroundSpec {
    /// Uniform fill.
    Solid { color: Rgb8 },
    /// Image scaled to cover the canvas and center-cropped. Relative paths resolve against the
    /// asset root.
    Image { path: PathBuf },
}

impl BackgroundSpec {
    pub fn solid(color: Rgb8) -> Self {
        Self::Solid { color }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self::Image { path: path.into() }
    }
}

impl Default for BackgroundSpec {
    fn default() -> Self {
        Self::Solid { color: Rgb8::WHITE }
    }
}

/// A painted background, ready for text.
#[derive(Clone, Debug)]
pub struct Background {
    /// Opaque RGBA8 pixels at canvas size.
    pub pixels: RgbaImage,
    /// Whether the pixels came from an image (text then gets a drop shadow).
    pub is_image: bool,
}

/// Centered region of a `src_w`x`src_h` image with the canvas aspect ratio, in source pixels.
///
/// Scaling this region to the canvas gives the same picture as scaling the whole image to cover
/// the canvas and cropping, while the resize target stays canvas-sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoverCrop {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Relatively wider images keep their full height and are cropped horizontally; others keep
/// their full width and are cropped vertically.
pub fn cover_crop(src_width: u32, src_height: u32, canvas: Canvas) -> CoverCrop {
    let src_width = src_width.max(1);
    let src_height = src_height.max(1);
    let target = canvas.aspect_ratio();
    let img_ratio = f64::from(src_width) / f64::from(src_height);
    if img_ratio > target {
        let width = ((f64::from(src_height) * target).round() as u32).clamp(1, src_width);
        CoverCrop {
            left: (src_width - width) / 2,
            top: 0,
            width,
            height: src_height,
        }
    } else {
        let height = ((f64::from(src_width) / target).round() as u32).clamp(1, src_height);
        CoverCrop {
            left: 0,
            top: (src_height - height) / 2,
            width: src_width,
            height,
        }
    }
}

pub fn solid(canvas: Canvas, color: Rgb8) -> RgbaImage {
    RgbaImage::from_pixel(canvas.width, canvas.height, image::Rgba(color.to_rgba()))
}

/// Decode `path`, center-crop it to the canvas aspect ratio and resample it to canvas size
/// (Lanczos).
pub fn from_image(canvas: Canvas, path: &Path) -> CarouselResult<RgbaImage> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read background image '{}'", path.display()))?;
    let decoded = image::load_from_memory(&bytes)
        .with_context(|| format!("decode background image '{}'", path.display()))?;
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(CarouselError::asset(format!(
            "background image '{}' is empty",
            path.display()
        )));
    }

    let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let crop = cover_crop(rgb.width(), rgb.height(), canvas);
    Ok(rgb
        .crop_imm(crop.left, crop.top, crop.width, crop.height)
        .resize_exact(canvas.width, canvas.height, FilterType::Lanczos3)
        .to_rgba8())
}

/// Paint `spec`. An image that cannot be loaded degrades to `fallback` and is logged.
pub fn render_background(
    canvas: Canvas,
    spec: &BackgroundSpec,
    asset_root: &Path,
    fallback: Rgb8,
) -> Background {
    match spec {
        BackgroundSpec::Solid { color } => Background {
            pixels: solid(canvas, *color),
            is_image: false,
        },
        BackgroundSpec::Image { path } => {
            let path = if path.is_absolute() {
                path.clone()
            } else {
                asset_root.join(path)
            };
            match from_image(canvas, &path) {
                Ok(pixels) => Background {
                    pixels,
                    is_image: true,
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "background image unusable, using solid background"
                    );
                    Background {
                        pixels: solid(canvas, fallback),
                        is_image: false,
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/background/render.rs"]
mod tests;
