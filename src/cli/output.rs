//! Result rendering for the CLI

use crate::valuation::{ValuationResult, VehicleDescriptor};
use clap::ValueEnum;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// Output format for valuation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON for downstream consumers
    Json,
}

/// A vehicle next to its estimate, as emitted in JSON output
#[derive(Debug, Serialize)]
pub(crate) struct Valued<'a> {
    pub vehicle: &'a VehicleDescriptor,
    pub valuation: &'a ValuationResult,
}

fn signed(value: Decimal) -> String {
    if value.is_sign_negative() && !value.is_zero() {
        format!("{value:.4}")
    } else {
        format!("+{value:.4}")
    }
}

/// Multi-line description of one estimate
pub fn format_result(vehicle: &VehicleDescriptor, result: &ValuationResult) -> String {
    let mut out = String::new();
    let projection = result
        .projection
        .iter()
        .map(|point| format!("m{} {:.2}", point.month_offset, point.value))
        .collect::<Vec<_>>()
        .join(" | ");

    let _ = writeln!(out, "{} {} ({})", vehicle.make, vehicle.model, vehicle.year);
    let _ = writeln!(out, "  Tier:          {}", result.tier);
    let _ = writeln!(out, "  Age:           {} years", result.age_years);
    let _ = writeln!(
        out,
        "  Base price:    {:.2} ({})",
        result.base_price,
        result.base_price_source.as_str()
    );
    let _ = writeln!(out, "  Current value: {:.2}", result.current_value);
    let _ = writeln!(out, "  Trend:         {} {}", result.trend.arrow(), result.trend);
    let _ = writeln!(out, "  Projection:    {projection}");
    let _ = writeln!(
        out,
        "  Factors:       mileage {}, age {}, market {}",
        signed(result.factors.mileage_impact),
        signed(result.factors.age_impact),
        signed(result.factors.market_condition_impact)
    );
    out
}

/// One row per vehicle plus a total line
pub fn format_summary(rows: &[(VehicleDescriptor, ValuationResult)]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<14} {:>6} {:>12} {:>12}  TREND",
        "MAKE", "MODEL", "YEAR", "BASE", "VALUE"
    );

    let mut total = Decimal::ZERO;
    for (vehicle, result) in rows {
        total += result.current_value;
        let _ = writeln!(
            out,
            "{:<16} {:<14} {:>6} {:>12.2} {:>12.2}  {} {}",
            vehicle.make,
            vehicle.model,
            vehicle.year,
            result.base_price,
            result.current_value,
            result.trend.arrow(),
            result.trend
        );
    }

    let _ = writeln!(out, "{} vehicles, total value {:.2}", rows.len(), total);
    out
}
