//! WavBake CLI - Command-line interface for baking audio clips into headers

pub mod commands;
pub mod progress;

use std::path::{Path, PathBuf};

use clap::Parser;
use commands::Commands;
use tracing::Level;

use crate::config::BakeConfig;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "wavbake.toml";

#[derive(Parser)]
#[command(name = "wavbake")]
#[command(about = "WavBake: bake spoken-word clips into firmware header assets", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pipeline config file (defaults to ./wavbake.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Run the WavBake CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = load_config(cli.config.as_deref())?;
    cli.command.execute(config)?;

    Ok(())
}

/// Load the pipeline config, falling back to defaults when no file exists
fn load_config(path: Option<&Path>) -> anyhow::Result<BakeConfig> {
    if let Some(path) = path {
        return Ok(BakeConfig::load(path)?);
    }

    let local = Path::new(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Ok(BakeConfig::load(local)?);
    }

    Ok(BakeConfig::default())
}
