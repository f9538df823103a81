use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "carousel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a carousel to numbered PNG pages.
    Render(RenderArgs),
    /// Print how the points split into pages, as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Engine config JSON. Relative paths inside it resolve against its directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Page height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Margin on every side, in pixels.
    #[arg(long)]
    margin: Option<u32>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input carousel JSON: `{"title": ..., "points": [...]}`.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for `page_NN.png` files.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    /// Page background, repeatable: `#rrggbb`, `r,g,b` or an image path.
    #[arg(long = "background", value_name = "SPEC")]
    backgrounds: Vec<String>,

    /// Named background set: `dark-slate` or `mixed`.
    #[arg(long, conflicts_with = "backgrounds")]
    preset: Option<carousel::Preset>,

    /// Render pages in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker thread count for `--parallel`.
    #[arg(long, requires = "parallel")]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Input carousel JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn read_input_json(path: &Path) -> anyhow::Result<carousel::CarouselInput> {
    let f = File::open(path).with_context(|| format!("open carousel input '{}'", path.display()))?;
    let r = BufReader::new(f);
    let input: carousel::CarouselInput =
        serde_json::from_reader(r).with_context(|| "parse carousel input JSON")?;
    Ok(input)
}

/// Config file (or defaults) with command-line overrides applied, plus its asset root.
fn load_config(args: &ConfigArgs) -> anyhow::Result<(carousel::CarouselConfig, PathBuf)> {
    let (mut cfg, root) = match &args.config {
        Some(path) => (
            carousel::CarouselConfig::from_json_file(path)?,
            carousel::CarouselConfig::asset_root_for(path),
        ),
        None => (carousel::CarouselConfig::default(), PathBuf::from(".")),
    };

    if let Some(w) = args.width {
        cfg.canvas.width = w;
    }
    if let Some(h) = args.height {
        cfg.canvas.height = h;
    }
    if let Some(m) = args.margin {
        cfg.canvas.margin = m;
    }
    cfg.validate()?;
    Ok((cfg, root))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let input = read_input_json(&args.in_path)?;
    let (mut cfg, root) = load_config(&args.config)?;

    if let Some(preset) = args.preset {
        cfg.backgrounds = preset.backgrounds();
    } else if !args.backgrounds.is_empty() {
        cfg.backgrounds = args
            .backgrounds
            .iter()
            .map(|s| carousel::parse_background(s))
            .collect();
    }
    if args.parallel {
        cfg.threading.parallel = true;
        cfg.threading.threads = args.threads;
    }

    let engine = carousel::CarouselEngine::new(cfg, root)?;
    let pages = engine.generate(&input);
    let written = carousel::write_pages(&args.out, &pages)?;

    for path in &written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let input = read_input_json(&args.in_path)?;
    let (cfg, root) = load_config(&args.config)?;

    let engine = carousel::CarouselEngine::new(cfg, root)?;
    let groups = engine.plan(&input);
    println!(
        "{}",
        serde_json::to_string_pretty(&groups).with_context(|| "serialize page plan")?
    );
    Ok(())
}
