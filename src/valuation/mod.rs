//! Resale value estimation module
//!
//! Estimates a vehicle's current resale value, a short monthly projection and
//! a trend label from static reference data and a caller-supplied random
//! source.

mod depreciation;
mod projection;
mod reference;
mod types;

pub use depreciation::DepreciationModel;
pub use projection::{project, PROJECTION_MONTHS};
pub use reference::{
    FactorParams, ProjectionParams, ReferenceData, ReferenceDataError, TierParams, TierTable,
    TrendRule,
};
pub use types::{
    BasePriceSource, BrandTier, ProjectionPoint, Trend, ValuationFactors, ValuationResult,
    VehicleDescriptor,
};

use rand::RngCore;

/// Trait for valuation model implementations
pub trait ValuationModel: Send + Sync {
    /// Estimate the resale value of a vehicle
    ///
    /// Never fails: every missing input has a fallback. The random source
    /// only feeds the diagnostic factors and the projection noise.
    fn estimate(&self, vehicle: &VehicleDescriptor, rng: &mut dyn RngCore) -> ValuationResult;

    /// Estimate a batch of vehicles, one result per input in input order
    fn estimate_batch(
        &self,
        vehicles: &[VehicleDescriptor],
        rng: &mut dyn RngCore,
    ) -> Vec<ValuationResult> {
        vehicles
            .iter()
            .map(|vehicle| self.estimate(vehicle, &mut *rng))
            .collect()
    }
}
