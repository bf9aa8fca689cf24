use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reelcomp", version)]
struct Cli {
    /// Log at debug level (overridden by `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a single timeline frame into a PNG.
    Frame(FrameArgs),
    /// Print the animated value of a clip property over a frame range as JSON.
    Sample(SampleArgs),
    /// List the built-in effects with their default parameters.
    Effects,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline frame (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Compositor options JSON, replacing the timeline's own `opts`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width override.
    #[arg(long)]
    width: Option<u32>,

    /// Output height override.
    #[arg(long)]
    height: Option<u32>,

    /// Render layers on the rayon pool.
    #[arg(long)]
    parallel: bool,

    /// Directory relative media paths resolve against (default: the timeline's directory).
    #[arg(long)]
    root: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Clip id.
    #[arg(long)]
    clip: String,

    /// Property name, e.g. `position_x`.
    #[arg(long)]
    property: String,

    /// First clip-relative frame.
    #[arg(long, default_value_t = 0)]
    from: u64,

    /// Last clip-relative frame (inclusive, default: the clip's last frame).
    #[arg(long)]
    to: Option<u64>,

    /// Clamp values to the property's documented range.
    #[arg(long)]
    clamp: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sample(args) => cmd_sample(args),
        Command::Effects => cmd_effects(),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_timeline(path: &Path) -> anyhow::Result<reelcomp::Timeline> {
    let timeline = reelcomp::Timeline::load(path)
        .with_context(|| format!("load timeline '{}'", path.display()))?;
    Ok(timeline)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let timeline = read_timeline(&args.in_path)?;

    let mut opts = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            serde_json::from_str::<reelcomp::CompositorOpts>(&text)
                .with_context(|| format!("parse config '{}'", path.display()))?
        }
        None => timeline.opts.clone(),
    };
    if let Some(w) = args.width {
        opts.width = w;
    }
    if let Some(h) = args.height {
        opts.height = h;
    }
    opts.parallel_layers |= args.parallel;

    let root = args.root.clone().unwrap_or_else(|| {
        args.in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let source = Arc::new(reelcomp::DiskFrameSource::with_root(root));
    let compositor = reelcomp::Compositor::new(opts, source.clone())?.with_probe(source);

    tracing::info!(
        frame = args.frame,
        clips = timeline.active_clips(args.frame).len(),
        "compositing"
    );
    let out = compositor.composite_frame(&timeline.clips, args.frame, timeline.background);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &out.data,
        out.width,
        out.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let timeline = read_timeline(&args.in_path)?;
    let clip = timeline
        .clip(&args.clip)
        .with_context(|| format!("no clip with id '{}'", args.clip))?;
    let to = args.to.unwrap_or(clip.duration.saturating_sub(1));
    anyhow::ensure!(args.from <= to, "empty frame range {}..={}", args.from, to);

    let info = reelcomp::animation::properties::property_info(&args.property);
    if args.clamp && info.is_none() {
        anyhow::bail!("property '{}' has no known range", args.property);
    }

    let mut samples = Vec::new();
    for frame in args.from..=to {
        let value = clip.animation.evaluate(&args.property, frame);
        let value = match (value, info) {
            (Some(reelcomp::PropertyValue::Scalar(v)), Some(info)) if args.clamp => {
                Some(reelcomp::PropertyValue::Scalar(info.clamp(v)))
            }
            (v, _) => v,
        };
        samples.push(serde_json::json!({ "frame": frame, "value": value }));
    }

    println!("{}", serde_json::to_string_pretty(&samples)?);
    Ok(())
}

fn cmd_effects() -> anyhow::Result<()> {
    let listing: Vec<_> = reelcomp::EffectKind::ALL
        .iter()
        .map(|kind| {
            serde_json::json!({
                "name": kind.name(),
                "display_name": kind.display_name(),
                "parameters": kind.default_parameters(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
