//! Valuation types
//!
//! Inputs and outputs of a resale value estimate. All values are transient:
//! computed on demand and never persisted.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Vehicle attributes that drive an estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleDescriptor {
    /// Manufacturer, e.g. "Toyota"
    pub make: String,
    /// Model name, e.g. "Camry"
    pub model: String,
    /// Model year
    pub year: i32,
    /// Price paid by the owner, if recorded
    #[serde(default, alias = "purchasePrice")]
    pub purchase_price: Option<Decimal>,
    /// Odometer reading in miles, if recorded
    #[serde(default)]
    pub mileage: Option<u32>,
}

impl VehicleDescriptor {
    /// Create a descriptor with no purchase price or mileage
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: i32) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
            purchase_price: None,
            mileage: None,
        }
    }

    /// Set the purchase price
    pub fn with_purchase_price(mut self, price: Decimal) -> Self {
        self.purchase_price = Some(price);
        self
    }

    /// Set the odometer reading
    pub fn with_mileage(mut self, mileage: u32) -> Self {
        self.mileage = Some(mileage);
        self
    }
}

/// Coarse brand classification driving depreciation and market sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    /// Brands that hold their value well
    HighRetention,
    /// Dependable volume brands
    ReliableMainstream,
    /// Premium brands with steep depreciation
    Luxury,
    /// Anything not listed in a tier
    Default,
}

impl BrandTier {
    /// All tiers in display order
    pub const ALL: [BrandTier; 4] = [
        BrandTier::HighRetention,
        BrandTier::ReliableMainstream,
        BrandTier::Luxury,
        BrandTier::Default,
    ];

    /// Stable label used for logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighRetention => "high_retention",
            Self::ReliableMainstream => "reliable_mainstream",
            Self::Luxury => "luxury",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for BrandTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected near-term direction of resale value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Value expected to rise
    Increasing,
    /// Value expected to fall
    Decreasing,
    /// No clear direction
    Stable,
}

impl Trend {
    /// Arrow shown next to the value
    pub fn arrow(&self) -> &'static str {
        match self {
            Self::Increasing => "↑",
            Self::Decreasing => "↓",
            Self::Stable => "→",
        }
    }

    /// Stable label used for logs and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the base price of an estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasePriceSource {
    /// Matched a (make, model) entry in the reference table
    ReferenceTable,
    /// Table miss, used the owner's purchase price
    PurchasePrice,
    /// Table miss and no purchase price
    Default,
}

impl BasePriceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReferenceTable => "reference_table",
            Self::PurchasePrice => "purchase_price",
            Self::Default => "default",
        }
    }
}

/// One point of the short-horizon projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Months from now (0 = current value)
    pub month_offset: u32,
    /// Projected value at that month
    pub value: Decimal,
}

/// Diagnostic factor breakdown
///
/// Shown alongside the estimate; none of these feed into `current_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationFactors {
    /// Relative impact of mileage versus the expected mileage for the age
    pub mileage_impact: Decimal,
    /// Relative impact of age
    pub age_impact: Decimal,
    /// Relative impact of brand market sentiment
    pub market_condition_impact: Decimal,
}

/// Point-in-time resale estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Estimated resale value now
    pub current_value: Decimal,
    /// Month-by-month lookahead, offsets 0..=3
    pub projection: Vec<ProjectionPoint>,
    /// Qualitative direction
    pub trend: Trend,
    /// Diagnostic breakdown
    pub factors: ValuationFactors,
    /// Price the depreciation was applied to
    pub base_price: Decimal,
    /// Which fallback produced `base_price`
    pub base_price_source: BasePriceSource,
    /// Brand tier of the make
    pub tier: BrandTier,
    /// Vehicle age in whole years
    pub age_years: u32,
}

impl ValuationResult {
    /// Change between the first and last projection points
    pub fn projected_change(&self) -> Decimal {
        match (self.projection.first(), self.projection.last()) {
            (Some(first), Some(last)) => last.value - first.value,
            _ => Decimal::ZERO,
        }
    }

    /// Current value as a fraction of the base price
    pub fn retained_fraction(&self) -> Decimal {
        if self.base_price.is_zero() {
            return Decimal::ZERO;
        }
        self.current_value / self.base_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_result(projection: Vec<ProjectionPoint>) -> ValuationResult {
        ValuationResult {
            current_value: dec!(20000),
            projection,
            trend: Trend::Stable,
            factors: ValuationFactors {
                mileage_impact: dec!(0),
                age_impact: dec!(0),
                market_condition_impact: dec!(0),
            },
            base_price: dec!(25000),
            base_price_source: BasePriceSource::Default,
            tier: BrandTier::Default,
            age_years: 1,
        }
    }

    #[test]
    fn test_descriptor_builder() {
        let vehicle = VehicleDescriptor::new("Honda", "Civic", 2020)
            .with_purchase_price(dec!(21000))
            .with_mileage(40_000);
        assert_eq!(vehicle.make, "Honda");
        assert_eq!(vehicle.purchase_price, Some(dec!(21000)));
        assert_eq!(vehicle.mileage, Some(40_000));
    }

    #[test]
    fn test_descriptor_deserialize_camel_case() {
        let json = r#"{"make":"Ford","model":"F-150","year":2019,"purchasePrice":"38000"}"#;
        let vehicle: VehicleDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(vehicle.purchase_price, Some(dec!(38000)));
        assert!(vehicle.mileage.is_none());
    }

    #[test]
    fn test_trend_display_and_arrow() {
        assert_eq!(Trend::Increasing.to_string(), "increasing");
        assert_eq!(Trend::Decreasing.arrow(), "↓");
        assert_eq!(Trend::Stable.arrow(), "→");
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        let json = serde_json::to_string(&Trend::Decreasing).unwrap();
        assert_eq!(json, "\"decreasing\"");
    }

    #[test]
    fn test_projected_change() {
        let result = sample_result(vec![
            ProjectionPoint { month_offset: 0, value: dec!(20000) },
            ProjectionPoint { month_offset: 3, value: dec!(20450.50) },
        ]);
        assert_eq!(result.projected_change(), dec!(450.50));
    }

    #[test]
    fn test_projected_change_empty() {
        let result = sample_result(Vec::new());
        assert_eq!(result.projected_change(), dec!(0));
    }

    #[test]
    fn test_retained_fraction() {
        let result = sample_result(Vec::new());
        assert_eq!(result.retained_fraction(), dec!(0.8));
    }
}
