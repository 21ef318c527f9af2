//! Command-line interface for par-canvas.
//!
//! Subcommands:
//! - `replay <script>`: run a scripted session and print the final canvas as JSON
//! - `default-config`: print the default configuration as YAML

use crate::script::{Replayer, load_script};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use par_canvas_config::Config;
use std::io::Write;
use std::path::{Path, PathBuf};

/// par-canvas - editor canvas layout and tab lifecycle engine
#[derive(Parser)]
#[command(name = "par-canvas")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/par-canvas/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level (overrides RUST_LOG and the config file)
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a YAML script of canvas steps and print the resulting snapshot
    Replay {
        /// Script file
        script: PathBuf,
    },
    /// Print the default configuration
    DefaultConfig,
}

/// Config from `--config`, else the user's config file if present, else defaults.
/// Never writes a config file.
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => {
            let user_path = Config::config_path();
            if user_path.exists() {
                Config::load_from(&user_path)
            } else {
                log::info!("No config at {}, using defaults", user_path.display());
                Ok(Config::default())
            }
        }
    }
}

/// Execute the parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let cli_level = cli.log_level.map(LogLevelArg::to_level_filter);

    match cli.command {
        Commands::DefaultConfig => {
            let yaml = serde_yaml_ng::to_string(&Config::default())
                .context("Failed to serialize default config")?;
            print!("{yaml}");
            Ok(())
        }
        Commands::Replay { script } => {
            let config = resolve_config(cli.config.as_deref())?;
            crate::debug::apply_config_level(cli_level, config.log_level.to_level_filter());

            let steps = load_script(&script)?;
            log::info!("Replaying {} steps from {}", steps.len(), script.display());

            let mut replayer = Replayer::new(&config);
            replayer
                .run(&steps)
                .with_context(|| format!("Replay of {} failed", script.display()))?;

            let snapshot = replayer.lifecycle().canvas().snapshot();
            let json =
                serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
            Ok(())
        }
    }
}
