//! Command line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

/// Log levels selectable from the command line.
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Initialize the logger with the given level.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

/// Arc-sweep illumination test simulator.
#[derive(Parser)]
#[command(name = "lumarc")]
#[command(about = "Arc-sweep illumination test simulator", long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the configured simulation and export CSV results
    Run {
        /// Path to a JSON settings file; defaults to the built-in rig
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Directory the CSV files are written to
        #[arg(short, long, default_value = "results")]
        output: PathBuf,
    },
    /// Write the default settings to a JSON file
    Init {
        /// Destination path
        #[arg(default_value = "lumarc.json")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the arc trajectory without tracing any rays
    Steps {
        /// Path to a JSON settings file; defaults to the built-in rig
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
