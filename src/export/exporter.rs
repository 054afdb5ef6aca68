use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use rayon::prelude::*;

use crate::{
    assets::decode::decode_image,
    compose::context::RenderContext,
    export::{
        renderer::SlideRenderer,
        request::{ExportRequest, upload_key},
        store::{ObjectStore, SourceFetcher, unix_millis},
    },
    foundation::{
        core::Canvas,
        error::{ExportError, SlideError, SlideResult},
    },
    geometry::scale::REFERENCE_PREVIEW_WIDTH,
    model::slide::Slide,
    style::constants::StyleConstants,
};

/// Content type of every uploaded frame.
pub const PNG_CONTENT_TYPE: &str = "image/png";

/// Batch export options.
#[derive(Clone, Debug)]
pub struct ExportOpts {
    /// Render slides on a rayon pool instead of one after another.
    pub parallel: bool,
    /// Pool size for parallel mode; `None` lets rayon decide.
    pub threads: Option<usize>,
    /// Upper bound for fetching one source image.
    pub fetch_timeout: Duration,
    /// Lifetime of the signed source URLs.
    pub url_ttl: Duration,
    /// Timestamp used in upload keys; the current time in milliseconds when `None`.
    pub timestamp: Option<u64>,
    /// Export canvas.
    pub canvas: Canvas,
    /// Preview width styles were authored against.
    pub reference_width: f64,
    /// Design constants.
    pub constants: StyleConstants,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            fetch_timeout: Duration::from_secs(30),
            url_ttl: Duration::from_secs(15 * 60),
            timestamp: None,
            canvas: Canvas::EXPORT,
            reference_width: REFERENCE_PREVIEW_WIDTH,
            constants: StyleConstants::default(),
        }
    }
}

impl ExportOpts {
    /// Apply `SLIDETEXT_THREADS` and `SLIDETEXT_FETCH_TIMEOUT_MS`. Unset, unparsable or zero
    /// values leave the current setting.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = std::env::var("SLIDETEXT_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.threads = Some(n);
        }
        if let Some(ms) = std::env::var("SLIDETEXT_FETCH_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.fetch_timeout = Duration::from_millis(ms);
        }
        self
    }

    /// Render context for the export canvas.
    pub fn render_context(&self) -> SlideResult<RenderContext> {
        RenderContext::new(self.canvas, self.reference_width, self.constants.clone())
    }
}

/// Renders every slide of a request and uploads the frames.
pub struct BatchExporter<'a> {
    store: &'a dyn ObjectStore,
    fetcher: &'a dyn SourceFetcher,
    renderer: &'a dyn SlideRenderer,
    opts: ExportOpts,
}

impl std::fmt::Debug for BatchExporter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchExporter")
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

struct Job<'r> {
    request: &'r ExportRequest,
    ctx: &'r RenderContext,
    timestamp: u64,
}

impl<'a> BatchExporter<'a> {
    /// Exporter over the given store, fetcher and renderer.
    pub fn new(
        store: &'a dyn ObjectStore,
        fetcher: &'a dyn SourceFetcher,
        renderer: &'a dyn SlideRenderer,
        opts: ExportOpts,
    ) -> Self {
        Self {
            store,
            fetcher,
            renderer,
            opts,
        }
    }

    /// Options in use.
    pub fn opts(&self) -> &ExportOpts {
        &self.opts
    }

    /// Export every slide in position order and return their URLs in that order.
    ///
    /// The first failing slide fails the whole export. Uploads that already finished are not
    /// removed.
    #[tracing::instrument(
        skip(self, request),
        fields(
            owner_id = %request.owner_id,
            slideshow_id = %request.slideshow_id,
            slides = request.slides.len(),
        )
    )]
    pub fn export(&self, request: &ExportRequest) -> Result<Vec<String>, ExportError> {
        request.validate().map_err(ExportError::Input)?;
        let ctx = self.opts.render_context().map_err(ExportError::Input)?;
        let timestamp = match self.opts.timestamp {
            Some(ts) => ts,
            None => unix_millis().map_err(ExportError::Input)?,
        };
        let slides = request.ordered_slides();
        let job = Job {
            request,
            ctx: &ctx,
            timestamp,
        };

        tracing::info!(
            parallel = self.opts.parallel,
            canvas_w = ctx.canvas.width,
            canvas_h = ctx.canvas.height,
            "export started"
        );

        let urls = if self.opts.parallel {
            self.export_parallel(&job, &slides)?
        } else {
            self.export_sequential(&job, &slides)?
        };

        tracing::info!(count = urls.len(), "export finished");
        Ok(urls)
    }

    fn export_sequential(
        &self,
        job: &Job<'_>,
        slides: &[&Slide],
    ) -> Result<Vec<String>, ExportError> {
        let mut urls = Vec::with_capacity(slides.len());
        for (index, slide) in slides.iter().enumerate() {
            let url = self
                .export_slide(job, index, slide)
                .map_err(|source| slide_failure(index, slide, source))?;
            urls.push(url);
        }
        Ok(urls)
    }

    fn export_parallel(
        &self,
        job: &Job<'_>,
        slides: &[&Slide],
    ) -> Result<Vec<String>, ExportError> {
        let pool = build_thread_pool(self.opts.threads).map_err(ExportError::Input)?;
        let failed = AtomicBool::new(false);

        let results = pool.install(|| {
            slides
                .par_iter()
                .enumerate()
                .map(|(index, slide)| {
                    if failed.load(Ordering::Relaxed) {
                        return None;
                    }
                    let res = self.export_slide(job, index, slide);
                    if res.is_err() {
                        failed.store(true, Ordering::Relaxed);
                    }
                    Some(res)
                })
                .collect::<Vec<_>>()
        });

        let mut urls = Vec::with_capacity(slides.len());
        let mut skipped = None;
        for (index, res) in results.into_iter().enumerate() {
            match res {
                Some(Ok(url)) => urls.push(url),
                Some(Err(source)) => return Err(slide_failure(index, slides[index], source)),
                None => {
                    skipped.get_or_insert(index);
                }
            }
        }
        if let Some(index) = skipped {
            return Err(slide_failure(
                index,
                slides[index],
                SlideError::render("slide skipped without a recorded failure"),
            ));
        }
        Ok(urls)
    }

    #[tracing::instrument(skip_all, fields(index = index, slide_id = %slide.id))]
    fn export_slide(&self, job: &Job<'_>, index: usize, slide: &Slide) -> SlideResult<String> {
        let url = self.store.signed_url(&slide.image, self.opts.url_ttl)?;
        let bytes = self.fetcher.fetch(&url, self.opts.fetch_timeout)?;
        let image = decode_image(&bytes)?;
        let frame = self.renderer.render(slide, &image, job.ctx)?;
        let png = frame.to_png_bytes()?;

        let key = upload_key(
            &job.request.owner_id,
            &job.request.slideshow_id,
            &slide.id,
            job.timestamp,
        );
        let out = self.store.put(&key, png, PNG_CONTENT_TYPE)?;
        tracing::debug!(key = %key, "slide uploaded");
        Ok(out)
    }
}

fn slide_failure(index: usize, slide: &Slide, source: SlideError) -> ExportError {
    tracing::warn!(index, slide_id = %slide.id, error = %source, "slide export failed");
    ExportError::Slide {
        index,
        slide_id: slide.id.clone(),
        source,
    }
}

fn build_thread_pool(threads: Option<usize>) -> SlideResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlideError::validation(
            "export 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlideError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/export/exporter.rs"]
mod tests;
