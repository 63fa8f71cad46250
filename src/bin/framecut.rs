use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "framecut", version)]
struct Cli {
    /// Log per-frame decisions (debug level).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cut a sprite sheet (or a directory of sheets) into frames.
    Slice(SliceArgs),
    /// Extract fully composited frames from an animated GIF.
    GifFrames(GifFramesArgs),
}

#[derive(Parser, Debug)]
struct SliceArgs {
    /// Sheet image, or a directory of sheets.
    input: PathBuf,

    /// Frame width, or WIDTHxHEIGHT to also set the cross extent.
    #[arg(long)]
    width: Option<String>,

    /// Number of frames to cut.
    #[arg(long)]
    slices: Option<u32>,

    /// Slicing direction.
    #[arg(long, value_enum, default_value_t = DirectionArg::H)]
    direction: DirectionArg,

    /// Base directory for output (defaults to the input's directory).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    /// Output quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,

    /// Transparent padding added around every frame, in pixels.
    #[arg(long, default_value_t = 0)]
    padding: u32,

    /// Resize every frame to WIDTHxHEIGHT.
    #[arg(long)]
    resize: Option<String>,

    /// Cut a fixed grid instead of detecting transparent gaps.
    #[arg(long = "no-auto-detect")]
    no_auto_detect: bool,

    /// Load the slicing job from a JSON file instead of flags.
    #[arg(
        long,
        conflicts_with_all = [
            "width",
            "slices",
            "direction",
            "format",
            "quality",
            "padding",
            "resize",
            "no_auto_detect",
        ]
    )]
    config: Option<PathBuf>,

    /// Worker threads for directory inputs.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct GifFramesArgs {
    /// Animated GIF to extract.
    input: PathBuf,

    /// Output directory (defaults to `<stem>_frames` next to the input).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Output image format.
    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,

    /// Output quality (1-100).
    #[arg(long, default_value_t = 90)]
    quality: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    H,
    V,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Png,
    Webp,
    Gif,
}

impl From<DirectionArg> for framecut::Axis {
    fn from(value: DirectionArg) -> Self {
        match value {
            DirectionArg::H => framecut::Axis::Horizontal,
            DirectionArg::V => framecut::Axis::Vertical,
        }
    }
}

impl From<FormatArg> for framecut::OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Png => framecut::OutputFormat::Png,
            FormatArg::Webp => framecut::OutputFormat::Webp,
            FormatArg::Gif => framecut::OutputFormat::Gif,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Slice(args) => cmd_slice(args),
        Command::GifFrames(args) => cmd_gif_frames(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn slice_job(args: &SliceArgs) -> anyhow::Result<framecut::SliceJob> {
    if let Some(path) = &args.config {
        return Ok(framecut::SliceJob::from_path(path)?);
    }

    let (frame_width, frame_height) = match &args.width {
        Some(w) => {
            let (w, h) = framecut::parse_dimensions(w)?;
            (Some(w), h)
        }
        None => (None, None),
    };
    let resize = args
        .resize
        .as_deref()
        .map(framecut::parse_size)
        .transpose()?
        .map(|(w, h)| [w, h]);

    Ok(framecut::SliceJob {
        frame_width,
        frame_height,
        slices: args.slices,
        direction: args.direction.into(),
        auto_detect: !args.no_auto_detect,
        padding: args.padding,
        resize,
        format: args.format.into(),
        quality: args.quality,
    })
}

fn cmd_slice(args: SliceArgs) -> anyhow::Result<()> {
    let job = slice_job(&args)?;
    job.validate()?;

    let inputs = framecut::collect_inputs(&args.input)?;
    if inputs.is_empty() {
        eprintln!("no images found in {}", args.input.display());
        return Ok(());
    }

    let items = framecut::slice_batch(&inputs, &job, args.output_dir.as_deref(), args.threads)?;
    let mut failed = 0usize;
    for item in &items {
        match &item.result {
            Ok(report) if report.frames_written == 0 => {
                eprintln!("no frames extracted from {}", item.input.display());
            }
            Ok(report) => eprintln!(
                "saved {} frames from {} to {}",
                report.frames_written,
                item.input.display(),
                report.output_dir.display()
            ),
            Err(e) => {
                failed += 1;
                eprintln!("error processing {}: {e}", item.input.display());
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} inputs failed", items.len());
    }
    Ok(())
}

fn cmd_gif_frames(args: GifFramesArgs) -> anyhow::Result<()> {
    let out_dir = match &args.out_dir {
        Some(d) => d.clone(),
        None => default_frames_dir(&args.input)?,
    };
    let report =
        framecut::extract_gif_frames(&args.input, &out_dir, args.format.into(), args.quality)
            .with_context(|| format!("extract frames from '{}'", args.input.display()))?;

    eprintln!(
        "extracted {} frames ({}x{}, {} ms) to {}",
        report.frames_written,
        report.canvas.0,
        report.canvas.1,
        report.total_duration_ms,
        out_dir.display()
    );
    Ok(())
}

fn default_frames_dir(input: &Path) -> anyhow::Result<PathBuf> {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("input '{}' has no file stem", input.display()))?;
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(format!("{stem}_frames")))
}
