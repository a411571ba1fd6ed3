//! Batch command implementation

use super::output::{format_summary, OutputFormat, Valued};
use super::random_source;
use crate::config::Config;
use crate::valuation::{DepreciationModel, ValuationModel, VehicleDescriptor};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON file holding an array of vehicles
    #[arg(short, long)]
    pub input: PathBuf,

    /// Seed for reproducible projections
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Read a JSON array of vehicle descriptors
pub fn read_vehicles(path: &Path) -> anyhow::Result<Vec<VehicleDescriptor>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading vehicles from {}", path.display()))?;
    let vehicles = serde_json::from_str(&content)
        .with_context(|| format!("parsing vehicles from {}", path.display()))?;
    Ok(vehicles)
}

impl BatchArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let model = DepreciationModel::new(config.reference_data()?);
        let vehicles = read_vehicles(&self.input)?;
        let mut rng = random_source(self.seed);

        let results = model.estimate_batch(&vehicles, &mut rng);
        tracing::info!(count = results.len(), "Batch valued");

        match self.format {
            OutputFormat::Table => {
                let rows: Vec<_> = vehicles.into_iter().zip(results).collect();
                print!("{}", format_summary(&rows));
            }
            OutputFormat::Json => {
                let valued: Vec<Valued<'_>> = vehicles
                    .iter()
                    .zip(&results)
                    .map(|(vehicle, valuation)| Valued { vehicle, valuation })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&valued)?);
            }
        }

        Ok(())
    }
}
