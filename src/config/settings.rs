use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;

use crate::{
    background::render::BackgroundSpec,
    foundation::{
        core::{Canvas, Rgb8},
        error::{CarouselError, CarouselResult},
    },
    layout::page::Palette,
    text::fonts::FontCandidate,
};

/// Everything an engine needs besides the carousel content itself.
///
/// Every field has a default, so `{}` is a complete config.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub canvas: Canvas,
    pub fonts: FontConfig,
    /// Cycled across pages; see [`background_for_page`].
    pub backgrounds: Vec<BackgroundSpec>,
    pub colors: Palette,
    pub threading: RenderThreading,
}

/// Fallback chains per font role, tried in order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub title: Vec<FontCandidate>,
    pub number: Vec<FontCandidate>,
    pub point: Vec<FontCandidate>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            title: vec![
                FontCandidate::file("fonts/Clearface-BoldItalic.ttf", 72.0),
                FontCandidate::system("sans-serif", 72.0),
            ],
            number: vec![
                FontCandidate::file("fonts/Clearface-Regular.ttf", 34.0),
                FontCandidate::system("sans-serif", 44.0),
            ],
            point: vec![
                FontCandidate::file("fonts/Clearface-Regular.ttf", 38.0),
                FontCandidate::system("sans-serif", 48.0),
            ],
        }
    }
}

/// Page-level parallelism for [`crate::CarouselEngine::generate`].
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    /// Render pages on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl CarouselConfig {
    /// Read and validate a JSON config.
    ///
    /// Relative font and image paths inside it are meant to be resolved against
    /// [`Self::asset_root_for`] of the same path.
    pub fn from_json_file(path: &Path) -> CarouselResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::parse(&text, &path.display().to_string())
    }

    pub fn from_json_str(text: &str) -> CarouselResult<Self> {
        Self::parse(text, "config json")
    }

    fn parse(text: &str, origin: &str) -> CarouselResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| CarouselError::serde(format!("{origin}: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Directory that relative paths in the config at `path` are relative to.
    pub fn asset_root_for(path: &Path) -> PathBuf {
        match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn validate(&self) -> CarouselResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height, self.canvas.margin)?;

        for (role, chain) in [
            ("title", &self.fonts.title),
            ("number", &self.fonts.number),
            ("point", &self.fonts.point),
        ] {
            if chain.is_empty() {
                return Err(CarouselError::validation(format!(
                    "fonts.{role} must list at least one candidate"
                )));
            }
            if let Some(c) = chain
                .iter()
                .find(|c| !c.size_px.is_finite() || c.size_px <= 0.0)
            {
                return Err(CarouselError::validation(format!(
                    "fonts.{role}: size_px must be finite and > 0, got {}",
                    c.size_px
                )));
            }
        }

        if self.threading.threads == Some(0) {
            return Err(CarouselError::validation(
                "threading.threads must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

/// Background for page `index` (0 is the title page).
///
/// The title page takes the first spec; content pages cycle through the rest. A single spec is
/// used for every page, and an empty list means plain white.
pub fn background_for_page(specs: &[BackgroundSpec], index: usize) -> BackgroundSpec {
    match specs {
        [] => BackgroundSpec::default(),
        [only] => only.clone(),
        [first, rest @ ..] => {
            if index == 0 {
                first.clone()
            } else {
                rest[(index - 1) % rest.len()].clone()
            }
        }
    }
}

/// Named background sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Slate title page; content pages cycle one slate then three grey.
    DarkSlate,
    /// Photo title page, then white, a second photo and light grey.
    Mixed,
}

impl Preset {
    pub fn backgrounds(self) -> Vec<BackgroundSpec> {
        match self {
            Self::DarkSlate => {
                let slate = BackgroundSpec::solid(Rgb8::new(45, 52, 54));
                let grey = BackgroundSpec::solid(Rgb8::new(99, 110, 114));
                vec![slate.clone(), slate, grey.clone(), grey.clone(), grey]
            }
            Self::Mixed => vec![
                BackgroundSpec::image("background1.jpg"),
                BackgroundSpec::solid(Rgb8::WHITE),
                BackgroundSpec::image("background2.jpg"),
                BackgroundSpec::solid(Rgb8::new(240, 240, 240)),
            ],
        }
    }
}

impl FromStr for Preset {
    type Err = CarouselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark-slate" => Ok(Self::DarkSlate),
            "mixed" => Ok(Self::Mixed),
            other => Err(CarouselError::validation(format!(
                "unknown preset '{other}' (expected dark-slate or mixed)"
            ))),
        }
    }
}

/// Parse a background given on the command line: `#rrggbb`, `r,g,b` or an image path.
pub fn parse_background(s: &str) -> BackgroundSpec {
    match s.parse::<Rgb8>() {
        Ok(color) => BackgroundSpec::solid(color),
        Err(_) => BackgroundSpec::image(s),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
