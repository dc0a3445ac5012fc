//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Swing Analyzer - Detect and classify tennis shots from pose streams
#[derive(Parser, Debug)]
#[command(name = "swing-analyzer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run shot analysis over an observation stream
    Analyze {
        /// Input observation stream file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the analysis report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interpolate the pose at a playback time
    Sample {
        /// Input observation stream file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Playback time in seconds
        #[arg(short, long)]
        time: f64,
    },

    /// Validate an observation stream file
    Validate {
        /// Input observation stream file (JSON)
        input: PathBuf,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "segmenter.min_shot_duration")
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the reports output directory
    pub fn reports_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".swing_analyzer").join("reports"))
            .unwrap_or_else(|| PathBuf::from("reports"))
    }
}
