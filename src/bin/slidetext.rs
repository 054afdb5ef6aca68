use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slidetext::{
    BatchExporter, Canvas, CpuSlideRenderer, DirStore, ExportOpts, ExportRequest, FontFace,
    REFERENCE_PREVIEW_WIDTH, RenderContext, Slide, SlideRenderer, StyleConstants, UrlFetcher,
};

#[derive(Parser, Debug)]
#[command(name = "slidetext", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one slide over a local image as a PNG.
    Frame(FrameArgs),
    /// Export every slide of a request against a directory-backed store.
    Export(ExportArgs),
    /// Print a slide's wrapped lines and box geometry as JSON.
    Layout(LayoutArgs),
}

#[derive(clap::Args, Debug)]
struct CanvasArgs {
    /// Canvas width in pixels.
    #[arg(long, default_value_t = slidetext::CANVAS_WIDTH)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = slidetext::CANVAS_HEIGHT)]
    height: u32,

    /// Width of the preview the slide was authored on.
    #[arg(long, default_value_t = REFERENCE_PREVIEW_WIDTH)]
    reference_width: f64,
}

impl CanvasArgs {
    fn render_context(&self) -> anyhow::Result<RenderContext> {
        let canvas = Canvas::new(self.width, self.height)?;
        Ok(RenderContext::new(
            canvas,
            self.reference_width,
            StyleConstants::default(),
        )?)
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input slide JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Background image.
    #[arg(long)]
    image: PathBuf,

    /// Font file used to shape and draw text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    canvas: CanvasArgs,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input export request JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Root directory of the object store.
    #[arg(long)]
    store: PathBuf,

    /// Font file used to shape and draw text.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Render slides in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Per-slide fetch timeout in milliseconds.
    #[arg(long)]
    fetch_timeout_ms: Option<u64>,

    /// Timestamp used in upload keys (default: now, in milliseconds).
    #[arg(long)]
    timestamp: Option<u64>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input slide JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Font file used to measure text.
    #[arg(long)]
    font: Option<PathBuf>,

    #[command(flatten)]
    canvas: CanvasArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn make_renderer(font: Option<&PathBuf>) -> anyhow::Result<CpuSlideRenderer> {
    match font {
        Some(path) => {
            let face = FontFace::from_path(path)?;
            tracing::info!(family = face.family(), "font loaded");
            Ok(CpuSlideRenderer::new(face))
        }
        None => Ok(CpuSlideRenderer::without_font()),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let slide = Slide::from_path(&args.in_path)?;
    slide.validate()?;
    let ctx = args.canvas.render_context()?;

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let image = slidetext::decode_image(&bytes)?;

    let renderer = make_renderer(args.font.as_ref())?;
    let frame = renderer.render(&slide, &image, &ctx)?;
    let png = frame.to_png_bytes()?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let request = ExportRequest::from_path(&args.in_path)?;

    let mut opts = ExportOpts::default().with_env_overrides();
    opts.parallel = args.parallel;
    if args.threads.is_some() {
        opts.threads = args.threads;
    }
    if let Some(ms) = args.fetch_timeout_ms {
        opts.fetch_timeout = std::time::Duration::from_millis(ms);
    }
    opts.timestamp = args.timestamp;

    let store = DirStore::new(&args.store);
    let fetcher = UrlFetcher::new()?;
    let renderer = make_renderer(args.font.as_ref())?;

    let urls = BatchExporter::new(&store, &fetcher, &renderer, opts).export(&request)?;
    for url in urls {
        println!("{url}");
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let slide = Slide::from_path(&args.in_path)?;
    slide.validate()?;
    let ctx = args.canvas.render_context()?;

    let renderer = make_renderer(args.font.as_ref())?;
    let plan = renderer.plan(&slide, &ctx, 1, 1)?;
    let json = serde_json::to_string_pretty(&plan.text).context("serialize layout")?;
    println!("{json}");
    Ok(())
}
