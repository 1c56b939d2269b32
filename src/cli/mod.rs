//! Courtside CLI
//!
//! Commands:
//! - `courtside predict` - Fetch once and print predictions
//! - `courtside watch` - Live dashboard with polling
//! - `courtside sample` - Print the embedded sample predictions
//! - `courtside config` - Show the effective configuration

pub mod dashboard;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use dashboard::Dashboard;
pub use output::{print_predictions, OutputMode, PredictionRow};

/// NBA win predictions from de-vigorized bookmaker odds
#[derive(Parser, Debug)]
#[command(name = "courtside")]
#[command(author, version, about = "NBA win predictions from bookmaker odds")]
pub struct Cli {
    /// Configuration directory
    #[arg(long, global = true, default_value = "config", env = "COURTSIDE_CONFIG_DIR")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one fetch cycle and print the ranked predictions
    Predict {
        /// Use sample data instead of live odds
        #[arg(long)]
        sample: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive dashboard (r: retry, m: toggle live/sample, q: quit)
    Watch,

    /// Print the embedded sample predictions
    Sample {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration (API key redacted)
    Config,
}
