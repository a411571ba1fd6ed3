//! Short-horizon value projection
//!
//! Month 0 is the current value; each later month compounds a trend-signed
//! drift plus uniform noise drawn from the caller's random source.

use super::reference::ProjectionParams;
use super::types::{ProjectionPoint, Trend};
use rand::{Rng, RngCore};
use rust_decimal::Decimal;

/// Months projected past the current one
pub const PROJECTION_MONTHS: u32 = 3;

/// Draw uniformly from `[-spread, spread]`
pub(crate) fn uniform(rng: &mut dyn RngCore, spread: Decimal) -> Decimal {
    let spread: f64 = spread.try_into().unwrap_or(0.0);
    if spread <= 0.0 {
        return Decimal::ZERO;
    }
    let draw = rng.gen_range(-spread..=spread);
    Decimal::try_from(draw).unwrap_or(Decimal::ZERO)
}

/// Build the projection series for a value and trend
pub fn project(
    current_value: Decimal,
    trend: Trend,
    params: &ProjectionParams,
    rng: &mut dyn RngCore,
) -> Vec<ProjectionPoint> {
    let drift = match trend {
        Trend::Increasing => params.monthly_drift,
        Trend::Decreasing => -params.monthly_drift,
        Trend::Stable => Decimal::ZERO,
    };

    let mut points = Vec::with_capacity(PROJECTION_MONTHS as usize + 1);
    let mut value = current_value;
    points.push(ProjectionPoint {
        month_offset: 0,
        value,
    });

    for month_offset in 1..=PROJECTION_MONTHS {
        let delta = drift + uniform(rng, params.monthly_noise);
        value = value
            .checked_mul(Decimal::ONE + delta)
            .unwrap_or(value)
            .round_dp(2);
        points.push(ProjectionPoint {
            month_offset,
            value,
        });
    }

    points
}
