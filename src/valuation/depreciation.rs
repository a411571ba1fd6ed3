//! Tiered straight-line depreciation model
//!
//! current_value = base_price * max(floor, 1 - age * tier_rate)
//!
//! The mileage and market factors are reported next to the value but do not
//! change it.

use super::projection::{project, uniform};
use super::reference::ReferenceData;
use super::types::{
    BasePriceSource, BrandTier, ValuationFactors, ValuationResult, VehicleDescriptor,
};
use super::ValuationModel;
use crate::telemetry;
use chrono::{Datelike, Utc};
use rand::RngCore;
use rust_decimal::{Decimal, RoundingStrategy};

/// Depreciation-based valuation model
#[derive(Debug, Clone)]
pub struct DepreciationModel {
    reference: ReferenceData,
    current_year: i32,
}

impl DepreciationModel {
    /// Create a model that ages vehicles against the current calendar year
    pub fn new(reference: ReferenceData) -> Self {
        Self::with_current_year(reference, Utc::now().year())
    }

    /// Create a model with a fixed "now" year
    pub fn with_current_year(reference: ReferenceData, current_year: i32) -> Self {
        Self {
            reference,
            current_year,
        }
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Whole years since the model year; future model years count as new
    pub fn age_of(&self, vehicle: &VehicleDescriptor) -> u32 {
        let age = self.current_year.saturating_sub(vehicle.year).max(0);
        u32::try_from(age).unwrap_or(0)
    }

    /// Resolve the base price: reference table, then purchase price, then default
    pub fn base_price(&self, vehicle: &VehicleDescriptor) -> (Decimal, BasePriceSource) {
        if let Some(price) = self.reference.reference_price(&vehicle.make, &vehicle.model) {
            return (price, BasePriceSource::ReferenceTable);
        }
        match vehicle.purchase_price {
            Some(price) if price > Decimal::ZERO => (price, BasePriceSource::PurchasePrice),
            _ => (self.reference.default_price, BasePriceSource::Default),
        }
    }

    /// Apply the tier's depreciation rate, clamped at the floor
    ///
    /// Rounds up to cents and never above the base price, so the result stays
    /// within `[floor * base, base]`.
    pub fn depreciated_value(&self, base_price: Decimal, tier: BrandTier, age: u32) -> Decimal {
        let rate = self.reference.tiers.get(tier).depreciation_rate;
        let retained = (Decimal::ONE - Decimal::from(age) * rate)
            .max(self.reference.depreciation_floor)
            .min(Decimal::ONE);
        (base_price * retained)
            .round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
            .min(base_price)
    }

    fn factors(
        &self,
        vehicle: &VehicleDescriptor,
        tier: BrandTier,
        age: u32,
        rng: &mut dyn RngCore,
    ) -> ValuationFactors {
        let params = &self.reference.factors;
        let age = Decimal::from(age);

        let age_impact = -age * params.age_impact_per_year;

        let mileage_impact = match vehicle.mileage {
            Some(mileage) => {
                let expected = Decimal::from(params.expected_miles_per_year) * age;
                (expected - Decimal::from(mileage)) / params.mileage_divisor
            }
            None => uniform(rng, params.random_spread),
        };

        let market_condition_impact = match self.reference.tiers.get(tier).market_condition {
            Some(impact) => impact,
            None => uniform(rng, params.random_spread),
        };

        ValuationFactors {
            mileage_impact: mileage_impact.round_dp(4),
            age_impact: age_impact.round_dp(4),
            market_condition_impact: market_condition_impact.round_dp(4),
        }
    }
}

impl ValuationModel for DepreciationModel {
    fn estimate(&self, vehicle: &VehicleDescriptor, rng: &mut dyn RngCore) -> ValuationResult {
        let age = self.age_of(vehicle);
        let tier = self.reference.tier_of(&vehicle.make);
        let (base_price, base_price_source) = self.base_price(vehicle);
        let current_value = self.depreciated_value(base_price, tier, age);
        let factors = self.factors(vehicle, tier, age, rng);
        let trend = self.reference.trend_for(tier, age);
        let projection = project(current_value, trend, &self.reference.projection, rng);

        tracing::debug!(
            make = %vehicle.make,
            model = %vehicle.model,
            age,
            tier = tier.as_str(),
            base_source = base_price_source.as_str(),
            %base_price,
            %current_value,
            trend = trend.as_str(),
            "Vehicle valued"
        );
        telemetry::record_estimate(tier, trend, base_price_source, current_value);

        ValuationResult {
            current_value,
            projection,
            trend,
            factors,
            base_price,
            base_price_source,
            tier,
            age_years: age,
        }
    }
}
