//! Carousel is a slide-deck image generator.
//!
//! It turns a title plus a list of points into fixed-size PNG pages: one centered title page,
//! then numbered points packed greedily onto as few pages as fit.
//!
//! - Build a [`CarouselEngine`] from a [`CarouselConfig`]
//! - [`CarouselEngine::plan`] to see how points split into pages
//! - [`CarouselEngine::generate`] to render, then [`write_pages`] to export
#![forbid(unsafe_code)]

mod foundation;

pub mod background;
pub mod carousel;
pub mod config;
pub mod layout;
pub mod paginate;
pub mod render;
pub mod text;

pub use crate::foundation::core::{BoundingBox, Canvas, Rect, Rgb8, TextTone};
pub use crate::foundation::error::{CarouselError, CarouselResult};

pub use crate::background::render::BackgroundSpec;
pub use crate::carousel::export::write_pages;
pub use crate::carousel::model::{CarouselInput, RenderedPage};
pub use crate::carousel::pipeline::CarouselEngine;
pub use crate::config::settings::{
    CarouselConfig, FontConfig, Preset, RenderThreading, background_for_page, parse_background,
};
pub use crate::layout::page::Palette;
pub use crate::paginate::paginator::{PageGroup, fits, paginate};
pub use crate::text::fonts::{FontBundle, FontCandidate, FontFace, FontSource};
