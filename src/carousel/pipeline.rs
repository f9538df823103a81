use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    carousel::model::{CarouselInput, RenderedPage, UNTITLED},
    config::settings::{CarouselConfig, background_for_page},
    foundation::error::{CarouselError, CarouselResult},
    layout::{page::PageRenderer, sizing::PageSizer},
    paginate::paginator::{PageGroup, paginate},
    text::{fonts::FontBundle, metrics::Typesetter},
};

/// Turns carousel content into page images.
///
/// Fonts are resolved once at construction and shared read-only by every render; shaping and
/// raster scratch lives in per-worker [`PageRenderer`]s.
pub struct CarouselEngine {
    config: CarouselConfig,
    fonts: FontBundle,
    asset_root: PathBuf,
}

enum PageJob<'a> {
    Title(&'a str),
    Points(&'a PageGroup),
}

impl CarouselEngine {
    /// Validate `config` and load its fonts. Relative paths resolve against `asset_root`.
    pub fn new(config: CarouselConfig, asset_root: impl Into<PathBuf>) -> CarouselResult<Self> {
        config.validate()?;
        let asset_root = asset_root.into();
        let fonts = FontBundle::load(
            &config.fonts.title,
            &config.fonts.number,
            &config.fonts.point,
            &asset_root,
        );
        Ok(Self {
            config,
            fonts,
            asset_root,
        })
    }

    /// Engine with an already resolved font bundle; the config's font chains are ignored.
    pub fn with_fonts(
        config: CarouselConfig,
        fonts: FontBundle,
        asset_root: impl Into<PathBuf>,
    ) -> CarouselResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fonts,
            asset_root: asset_root.into(),
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn fonts(&self) -> &FontBundle {
        &self.fonts
    }

    pub fn asset_root(&self) -> &Path {
        &self.asset_root
    }

    /// Page groups the points would be split into, without drawing anything.
    pub fn plan(&self, input: &CarouselInput) -> Vec<PageGroup> {
        let sizer = PageSizer::new(self.config.canvas, &self.fonts);
        paginate(&mut Typesetter::new(), &sizer, &input.points)
    }

    /// Title page followed by one page per group, in order. Never fails: unusable backgrounds
    /// and fonts have already been replaced by fallbacks.
    #[tracing::instrument(skip_all, fields(points = input.points.len()))]
    pub fn generate(&self, input: &CarouselInput) -> Vec<RenderedPage> {
        if input.title.trim().is_empty() {
            tracing::warn!("carousel has no title, using \"{UNTITLED}\"");
        }
        let groups = self.plan(input);
        let mut jobs = Vec::with_capacity(groups.len() + 1);
        jobs.push(PageJob::Title(input.display_title()));
        jobs.extend(groups.iter().map(PageJob::Points));

        let threading = &self.config.threading;
        let pages = if threading.parallel && jobs.len() > 1 {
            match build_thread_pool(threading.threads) {
                Ok(pool) => pool.install(|| {
                    jobs.par_iter()
                        .enumerate()
                        .map_init(
                            || self.renderer(),
                            |renderer, (index, job)| self.render_job(renderer, index, job),
                        )
                        .collect()
                }),
                Err(e) => {
                    tracing::warn!(error = %e, "falling back to sequential rendering");
                    self.render_sequential(&jobs)
                }
            }
        } else {
            self.render_sequential(&jobs)
        };

        tracing::debug!(pages = pages.len(), "rendered carousel");
        pages
    }

    fn render_sequential(&self, jobs: &[PageJob<'_>]) -> Vec<RenderedPage> {
        let mut renderer = self.renderer();
        jobs.iter()
            .enumerate()
            .map(|(index, job)| self.render_job(&mut renderer, index, job))
            .collect()
    }

    fn renderer(&self) -> PageRenderer<'_> {
        PageRenderer::new(
            self.config.canvas,
            &self.fonts,
            self.config.colors,
            &self.asset_root,
        )
    }

    fn render_job(
        &self,
        renderer: &mut PageRenderer<'_>,
        index: usize,
        job: &PageJob<'_>,
    ) -> RenderedPage {
        let background = background_for_page(&self.config.backgrounds, index);
        let pixels = match job {
            PageJob::Title(title) => renderer.title_page(title, &background),
            PageJob::Points(group) => {
                renderer.points_page(&group.points, group.start_number, &background)
            }
        };
        RenderedPage { index, pixels }
    }
}

fn build_thread_pool(threads: Option<usize>) -> CarouselResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CarouselError::validation(
            "threading.threads must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}
