use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recycler_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "recycler")]
#[command(author, version, about = "A virtualized, slot-recycling list in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ~/.config/recycler/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Number of items to start with (overrides general.seed_count)
    #[arg(short = 's', long = "seed", global = true)]
    seed: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI
    Run,
    /// Replay list commands without a terminal and print the result as JSON
    Script {
        /// Script file (reads stdin when omitted)
        file: Option<PathBuf>,
        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },
    /// Print the layout metrics derived for an item count
    Layout {
        /// Number of items in the list
        #[arg(short = 'n', long)]
        count: Option<usize>,
        /// Viewport height in pixels (overrides layout.viewport_height)
        #[arg(long)]
        viewport: Option<f32>,
    },
    /// Print the effective configuration
    Config {
        /// Only print the configuration file path
        #[arg(long)]
        path: bool,
    },
}

/// Log to stderr for one-shot commands; the TUI owns the terminal, so it
/// logs to a file under the data directory instead
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_from(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(seed) = cli.seed {
        config.general.seed_count = seed;
    }

    let is_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, is_tui)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Script { file, pretty }) => {
            commands::script::run(&config, file.as_deref(), pretty).await
        }
        Some(Commands::Layout { count, viewport }) => {
            let count = count.unwrap_or(config.general.seed_count);
            commands::layout::run(&config, count, viewport)
        }
        Some(Commands::Config { path }) => commands::config::run(&config, &config_path, path),
    }
}
