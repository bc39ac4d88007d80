use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use allrgb::models::{candidate_geometries, RunConfig};
use allrgb::services::Generator;

#[derive(Parser)]
#[command(name = "allrgb")]
#[command(about = "Generate images that use every color of an RGB palette exactly once")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Place every palette color and write the mosaic as PNG
    Generate(GenerateArgs),
    /// List grid sizes that hold exactly depth³ colors
    Sizes {
        /// Levels per channel (2..=256)
        #[arg(short, long)]
        depth: u32,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// YAML run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Levels per channel (2..=256)
    #[arg(short, long)]
    depth: Option<u32>,

    /// Grid width (requires --height)
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Grid height (requires --width)
    #[arg(long, requires = "width")]
    height: Option<u32>,

    /// Shuffle seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Worker threads for the frontier scan
    #[arg(short, long)]
    threads: Option<usize>,

    /// Frontier implementation: "indexed" or "arena"
    #[arg(long)]
    frontier: Option<String>,

    /// Tie-break between equally good cells: "position" or "coin-flip"
    #[arg(long)]
    tie_break: Option<String>,

    /// Neighbor fit: "nearest" or "average"
    #[arg(long)]
    metric: Option<String>,

    /// Output PNG file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Re-compress the PNG with oxipng
    #[arg(long)]
    optimize: bool,

    /// Print a JSON run report to stdout
    #[arg(long)]
    report: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl GenerateArgs {
    /// Layer command-line flags over the config file (or defaults)
    fn into_config(self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(depth) = self.depth {
            config.depth = depth;
            // a new depth invalidates the file's geometry unless flags give one
            if self.width.is_none() {
                config.width = None;
                config.height = None;
            }
        }
        if self.width.is_some() {
            config.width = self.width;
            config.height = self.height;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        if let Some(frontier) = self.frontier {
            config.frontier = frontier;
        }
        if let Some(tie_break) = self.tie_break {
            config.tie_break = tie_break;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.optimize |= self.optimize;

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate_command(args),
        Commands::Sizes { depth } => {
            init_logging(false);
            run_sizes_command(depth)
        }
    }
}

fn init_logging(quiet: bool) {
    let default_filter = if quiet {
        "allrgb=warn,allrgb_engine=warn"
    } else {
        "allrgb=info,allrgb_engine=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
}

fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    init_logging(args.quiet);
    let print_report = args.report;
    let config = args.into_config()?;

    let report = Generator::new(config).generate_to_file()?;

    if print_report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        tracing::info!(
            "Seed {} ({} colors, {}x{}) - rerun with --seed {} to reproduce",
            report.seed,
            report.colors,
            report.geometry.width,
            report.geometry.height,
            report.seed
        );
    }
    Ok(())
}

fn run_sizes_command(depth: u32) -> anyhow::Result<()> {
    let geometries = candidate_geometries(depth)?;
    println!(
        "Grid sizes for depth {depth} ({} colors):",
        allrgb_engine::palette_len(depth)
    );
    for geometry in geometries {
        println!("  {geometry}");
    }
    Ok(())
}
