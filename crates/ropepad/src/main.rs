use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ropepad_config::AppConfig;

/// A terminal line editor built on a persistent byte rope.
#[derive(Parser, Debug)]
#[command(name = "ropepad", version, about)]
struct Cli {
    /// File to edit. Without one, the buffer is named on first save.
    file: Option<PathBuf>,

    /// Config file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file. The terminal is taken by the editor, so
    /// logs are discarded otherwise.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file: {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::sink)
                .init();
        }
    }
    Ok(())
}

#[cfg(unix)]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    tracing::info!("Starting ropepad");

    let config_path = cli.config.unwrap_or_else(AppConfig::config_path);
    let config = AppConfig::load_or_create(&config_path);
    tracing::debug!(path = %config_path.display(), ?config, "loaded config");

    let startup_args = ropepad_tui::StartupArgs { file: cli.file };
    ropepad_tui::run(startup_args, &config)
}

#[cfg(not(unix))]
fn main() -> Result<()> {
    anyhow::bail!("ropepad needs a Unix terminal")
}
