use std::str::FromStr;

use crate::foundation::error::{CarouselError, CarouselResult};

pub use kurbo::Rect;

/// Pixel bounding box of a measured text run (`x0,y0` top-left, `x1,y1` bottom-right).
pub type BoundingBox = Rect;

/// Fixed drawing surface for one page: pixel size plus the margin reserved on every side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            margin: 100,
        }
    }
}

impl Canvas {
    /// Largest edge the CPU rasterizer can allocate.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    pub fn new(width: u32, height: u32, margin: u32) -> CarouselResult<Self> {
        if width == 0 || height == 0 {
            return Err(CarouselError::validation(
                "canvas width and height must be > 0",
            ));
        }
        if width > Self::MAX_EDGE || height > Self::MAX_EDGE {
            return Err(CarouselError::validation(format!(
                "canvas edges must be <= {}",
                Self::MAX_EDGE
            )));
        }
        if margin.saturating_mul(2) >= width || margin.saturating_mul(2) >= height {
            return Err(CarouselError::validation(
                "canvas margin must leave a non-empty content box",
            ));
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    /// Width available to text between the left and right margins.
    pub fn content_width(self) -> f32 {
        (self.width - 2 * self.margin) as f32
    }

    /// Bottom edge of the content box (canvas height minus the bottom margin).
    pub fn content_bottom(self) -> f32 {
        (self.height - self.margin) as f32
    }

    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Opaque RGB8 color; serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Parses `#rrggbb`, `rrggbb` or `r,g,b`.
impl FromStr for Rgb8 {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains(',') {
            let parts = s
                .split(',')
                .map(|p| p.trim().parse::<u8>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CarouselError::validation(format!("invalid color '{s}': {e}")))?;
            let [r, g, b] = parts[..] else {
                return Err(CarouselError::validation(format!(
                    "color '{s}' must have exactly 3 components"
                )));
            };
            return Ok(Self { r, g, b });
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(CarouselError::validation(format!(
                "color '{s}' must be #rrggbb or r,g,b"
            )));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| CarouselError::validation(format!("invalid color '{s}': {e}")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Text color class picked for a background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTone {
    /// Light text, for dark backgrounds.
    Light,
    /// Dark text, for light backgrounds.
    Dark,
}

impl TextTone {
    /// Shadow color drawn under text on busy (image) backgrounds.
    pub fn shadow(self) -> Rgb8 {
        match self {
            Self::Light => Rgb8::BLACK,
            Self::Dark => Rgb8::WHITE,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
