use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{carousel::model::RenderedPage, foundation::error::CarouselResult};

/// Write each page as `dir/page_NN.png` (see [`RenderedPage::file_name`]), creating `dir` if
/// needed. Returns the written paths in page order.
pub fn write_pages(dir: &Path, pages: &[RenderedPage]) -> CarouselResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;

    let mut written = Vec::with_capacity(pages.len());
    for page in pages {
        let path = dir.join(page.file_name());
        image::save_buffer_with_format(
            &path,
            page.pixels.as_raw(),
            page.pixels.width(),
            page.pixels.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "wrote page");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/export.rs"]
mod tests;
