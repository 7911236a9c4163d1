use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake3d::game::GameConfig;
use snake3d::modes::{HeadlessMode, HumanMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake3d")]
#[command(version, about = "Grid-based 3D snake game")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// TOML config file (defaults to $SNAKE3D_CONFIG, then config/snake3d.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the playing field
    #[arg(long)]
    grid_size: Option<u32>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second fed to the simulation
    #[arg(long, default_value = "60")]
    fps: u32,

    /// Simulated seconds to run in headless mode
    #[arg(long, default_value = "120")]
    duration: f64,

    /// Write logs to this file (terminal modes log nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play with the keyboard
    Human,
    /// Watch the autopilot play
    Demo,
    /// Run the autopilot without a UI and print a summary
    Headless,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if cli.mode == Mode::Headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GameConfig::load_or_default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate().context("Invalid game configuration")?;

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = load_config(&cli)?;
    tracing::info!(grid_size = config.grid_size, seed = ?config.seed, "starting snake3d");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config, cli.fps)?;
            human_mode.run().await?;
        }
        Mode::Demo => {
            let mut demo_mode = HumanMode::demo(config, cli.fps)?;
            demo_mode.run().await?;
        }
        Mode::Headless => {
            let summary = HeadlessMode::new(config, cli.fps, cli.duration)?.run()?;
            println!("simulated:      {:.1}s ({} frames)", summary.simulated_secs, summary.frames);
            let metrics = &summary.metrics;
            println!("ticks:          {}", metrics.ticks);
            println!("games played:   {}", metrics.games_played);
            println!("best score:     {}", metrics.best_score);
            println!("best level:     {}", metrics.best_level);
            println!("longest snake:  {}", metrics.longest_snake);
            println!("food eaten:     {}", metrics.food_eaten);
            println!("special eaten:  {}", metrics.special_food_eaten);
        }
    }

    Ok(())
}
