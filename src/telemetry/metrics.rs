//! Valuation metrics
//!
//! Recorded through the `metrics` facade; without an installed recorder every
//! call is a no-op.

use crate::valuation::{BasePriceSource, BrandTier, Trend};
use rust_decimal::Decimal;

/// Metric types emitted by the estimator
#[derive(Debug, Clone, Copy)]
pub enum ValuationMetric {
    /// Estimates produced, by tier and trend
    Estimates,
    /// Estimates whose base price did not come from the reference table
    BasePriceFallback,
    /// Distribution of current values
    CurrentValue,
}

impl ValuationMetric {
    /// Exported metric name
    pub fn name(&self) -> &'static str {
        match self {
            ValuationMetric::Estimates => "valuation_estimates_total",
            ValuationMetric::BasePriceFallback => "valuation_base_price_fallback_total",
            ValuationMetric::CurrentValue => "valuation_current_value",
        }
    }
}

/// Record one completed estimate
pub fn record_estimate(
    tier: BrandTier,
    trend: Trend,
    source: BasePriceSource,
    current_value: Decimal,
) {
    ::metrics::counter!(
        ValuationMetric::Estimates.name(),
        "tier" => tier.as_str(),
        "trend" => trend.as_str()
    )
    .increment(1);

    if source != BasePriceSource::ReferenceTable {
        ::metrics::counter!(
            ValuationMetric::BasePriceFallback.name(),
            "source" => source.as_str()
        )
        .increment(1);
    }

    let value: f64 = current_value.try_into().unwrap_or(0.0);
    ::metrics::histogram!(ValuationMetric::CurrentValue.name()).record(value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_metric_names() {
        assert_eq!(ValuationMetric::Estimates.name(), "valuation_estimates_total");
        assert_eq!(
            ValuationMetric::BasePriceFallback.name(),
            "valuation_base_price_fallback_total"
        );
    }

    #[test]
    fn test_record_without_recorder() {
        record_estimate(
            BrandTier::Luxury,
            Trend::Decreasing,
            BasePriceSource::PurchasePrice,
            dec!(12345.67),
        );
    }
}
