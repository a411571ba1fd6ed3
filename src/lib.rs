//! vehicle-valuation: Resale value estimation for vehicle passport records
//!
//! This library provides:
//! - Tiered depreciation valuation with a monthly projection and trend label
//! - Injectable reference data (price table, brand tiers, constants)
//! - An explicit random source for reproducible estimates
//! - CLI commands for single and batch estimates
//! - Structured logging and valuation metrics

pub mod cli;
pub mod config;
pub mod telemetry;
pub mod valuation;
