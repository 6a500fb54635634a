use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "handwrite", version)]
struct Cli {
    /// Log at debug level (page breaks, backend setup, ffmpeg start).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole animation as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Source document (.docx, .txt or .md).
    #[arg(long)]
    doc: PathBuf,

    /// Font file (TTF/OTF) used for the handwriting.
    #[arg(long)]
    font: PathBuf,

    /// Cursor marker image (PNG, JPEG, SVG, ...).
    #[arg(long)]
    marker: PathBuf,

    /// Layout parameters JSON; flags below override its values.
    #[arg(long)]
    params: Option<PathBuf>,

    /// Glyph size in pixels.
    #[arg(long)]
    font_size: Option<u32>,

    /// Lines per page.
    #[arg(long)]
    max_lines: Option<u32>,

    /// Hold frames at each page break and at the end.
    #[arg(long)]
    delay_frames: Option<u32>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Print the resolved font family and SHA-256 of the font bytes.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Output MP4 path.
    #[arg(long, default_value = handwrite::DEFAULT_OUTPUT_NAME)]
    out: PathBuf,

    /// Write run statistics as JSON to this path.
    #[arg(long)]
    stats_json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_job(args: &JobArgs) -> anyhow::Result<handwrite::HandwriteJob> {
    let mut params = match &args.params {
        Some(path) => handwrite::LayoutParams::from_json_path(path)?,
        None => handwrite::LayoutParams::default(),
    };
    if let Some(v) = args.font_size {
        params.font_size = v;
    }
    if let Some(v) = args.max_lines {
        params.max_lines = v;
    }
    if let Some(v) = args.delay_frames {
        params.delay_frames = v;
    }
    if let Some(v) = args.fps {
        params.fps = v;
    }

    let job = handwrite::HandwriteJob::load(&args.doc, &args.font, &args.marker, params)?;
    if args.dump_fonts {
        dump_font_diagnostics(&args.font, job.font());
    }
    Ok(job)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job)?;
    let stats = job.render_to_mp4(&args.out)?;

    if let Some(path) = &args.stats_json {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(&stats).context("serialize run stats")?;
        std::fs::write(path, json)
            .with_context(|| format!("write stats '{}'", path.display()))?;
    }

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let job = load_job(&args.job)?;
    let frame = job.render_frame(handwrite::FrameIndex(args.frame))?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn dump_font_diagnostics(path: &Path, font: &handwrite::FontAsset) {
    eprintln!("text font diagnostics:");
    eprintln!("  source: {}", path.display());
    eprintln!("  family: {}", font.family());
    eprintln!("  sha256: {}", sha256_hex(font.bytes()));
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
