//! Tessel CLI
//!
//! Play scripted performances headlessly and inspect the key layout and
//! configuration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod play;

use play::PlayOptions;
use tessel_app::StageConfig;
use tessel_platform::{KeyMap, DEFAULT_COLS};

#[derive(Parser)]
#[command(name = "tessel")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tessel performance surface CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a key sequence without a window
    Play {
        /// Keys to press, in order; whitespace is skipped
        #[arg(short, long)]
        keys: String,

        /// Frames to run after each key press
        #[arg(short, long, default_value = "8")]
        frames: u32,

        /// Seed for the per-shape jitter (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stage config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Viewport width in logical pixels
        #[arg(long, default_value = "1920")]
        width: f32,

        /// Viewport height in logical pixels
        #[arg(long, default_value = "1080")]
        height: f32,
    },

    /// Show which key triggers which cell
    Keymap,

    /// Print the default stage config
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Play {
            keys,
            frames,
            seed,
            config,
            width,
            height,
        } => cmd_play(PlayOptions {
            keys,
            frames_per_key: frames,
            seed,
            config,
            width,
            height,
        }),

        Commands::Keymap => cmd_keymap(),

        Commands::Config { output } => cmd_config(output),
    }
}

fn cmd_play(options: PlayOptions) -> Result<()> {
    let config = match &options.config {
        Some(path) => StageConfig::load(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => StageConfig::default(),
    };

    info!(
        "Playing {} keys ({} frames each)",
        options.keys.chars().filter(|c| !c.is_whitespace()).count(),
        options.frames_per_key
    );

    let summary = play::run(&options, &config)?;

    println!();
    println!("Performance summary");
    println!("===================");
    println!("  triggers:   {}", summary.stats.triggers);
    println!("  restarted:  {}", summary.stats.restarted);
    println!("  evicted:    {}", summary.stats.evicted);
    println!("  reaped:     {}", summary.stats.reaped);
    println!("  frames:     {}", summary.frames);
    println!("  duration:   {:.3}s", summary.duration_secs);
    println!("  background: {}", summary.background);
    if let Some(seed) = options.seed {
        println!("  seed:       {}", seed);
    }

    Ok(())
}

fn cmd_keymap() -> Result<()> {
    let keymap = KeyMap::standard();
    let rows = keymap.rows_top_down(DEFAULT_COLS);
    let row_count = rows.len();

    println!("Tessel key layout");
    println!("=================");
    for (i, row) in rows.iter().enumerate() {
        let first = (row_count - 1 - i) * DEFAULT_COLS;
        let last = first + row.len().saturating_sub(1);
        let keys: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("  {}    cells {:>2}..={:>2}", keys.join(" "), first, last);
    }

    Ok(())
}

fn cmd_config(output: Option<PathBuf>) -> Result<()> {
    let text = StageConfig::default()
        .to_toml()
        .context("Failed to serialize config")?;

    match output {
        Some(path) => {
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Config written to {}", path.display());
        }
        None => print!("{}", text),
    }

    Ok(())
}
