//! Reference command implementation

use crate::config::Config;
use crate::valuation::{BrandTier, ReferenceData, TrendRule};
use clap::{Args, ValueEnum};
use std::fmt::Write;

/// Output format for the reference tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReferenceFormat {
    /// Human-readable tables
    Table,
    /// TOML, loadable as a reference data file
    Toml,
}

#[derive(Args, Debug)]
pub struct ReferenceArgs {
    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: ReferenceFormat,
}

fn describe_rule(rule: &TrendRule) -> String {
    match rule {
        TrendRule::Increasing { below_age } => format!("increasing below {below_age}y"),
        TrendRule::Decreasing { above_age } => format!("decreasing above {above_age}y"),
        TrendRule::Stable => "stable".to_string(),
    }
}

/// Tiers, constants and the price table as text
pub fn format_reference(data: &ReferenceData) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Default price: {}", data.default_price);
    let _ = writeln!(out, "Depreciation floor: {}", data.depreciation_floor);
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<20} {:>6} {:>8}  {:<24} BRANDS", "TIER", "RATE", "MARKET", "TREND");
    for tier in BrandTier::ALL {
        let params = data.tiers.get(tier);
        let market = match params.market_condition {
            Some(impact) => impact.to_string(),
            None => format!("±{}", data.factors.random_spread),
        };
        let brands = if params.brands.is_empty() {
            "-".to_string()
        } else {
            params.brands.join(", ")
        };
        let _ = writeln!(
            out,
            "{:<20} {:>6} {:>8}  {:<24} {}",
            tier.as_str(),
            params.depreciation_rate,
            market,
            describe_rule(&params.trend),
            brands
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<16} {:<14} {:>10}", "MAKE", "MODEL", "PRICE");
    for (make, models) in &data.prices {
        for (model, price) in models {
            let _ = writeln!(out, "{make:<16} {model:<14} {price:>10}");
        }
    }

    out
}

impl ReferenceArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let data = config.reference_data()?;
        match self.format {
            ReferenceFormat::Table => print!("{}", format_reference(&data)),
            ReferenceFormat::Toml => print!("{}", toml::to_string_pretty(&data)?),
        }
        Ok(())
    }
}
