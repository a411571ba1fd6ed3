//! CLI interface for vehicle-valuation
//!
//! Provides subcommands for:
//! - `estimate`: Value a single vehicle
//! - `batch`: Value every vehicle in a JSON file
//! - `reference`: Show the reference tables
//! - `config`: Show configuration

mod batch;
mod estimate;
mod output;
mod reference;

pub use batch::BatchArgs;
pub use estimate::EstimateArgs;
pub use output::{format_result, format_summary, OutputFormat};
pub use reference::{ReferenceArgs, ReferenceFormat};

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "vehicle-valuation")]
#[command(about = "Resale value estimation for vehicle passport records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value a single vehicle
    Estimate(EstimateArgs),
    /// Value every vehicle in a JSON file
    Batch(BatchArgs),
    /// Show the reference tables
    Reference(ReferenceArgs),
    /// Show configuration
    Config,
}

/// Random source for a command run: seeded when asked, entropy otherwise
pub fn random_source(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
