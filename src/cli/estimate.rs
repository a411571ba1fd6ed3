//! Estimate command implementation

use super::output::{format_result, OutputFormat, Valued};
use super::random_source;
use crate::config::Config;
use crate::valuation::{DepreciationModel, ValuationModel, VehicleDescriptor};
use clap::Args;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Vehicle make
    #[arg(long)]
    pub make: String,

    /// Vehicle model
    #[arg(long)]
    pub model: String,

    /// Model year
    #[arg(long)]
    pub year: i32,

    /// Price paid, used when the make/model is not in the reference table
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Odometer reading in miles
    #[arg(long)]
    pub mileage: Option<u32>,

    /// Seed for a reproducible projection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl EstimateArgs {
    /// Vehicle described by the arguments
    pub fn vehicle(&self) -> VehicleDescriptor {
        VehicleDescriptor {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            purchase_price: self.purchase_price,
            mileage: self.mileage,
        }
    }

    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let model = DepreciationModel::new(config.reference_data()?);
        let vehicle = self.vehicle();
        let mut rng = random_source(self.seed);

        let result = model.estimate(&vehicle, &mut rng);

        match self.format {
            OutputFormat::Table => print!("{}", format_result(&vehicle, &result)),
            OutputFormat::Json => {
                let valued = Valued {
                    vehicle: &vehicle,
                    valuation: &result,
                };
                println!("{}", serde_json::to_string_pretty(&valued)?);
            }
        }

        Ok(())
    }
}
