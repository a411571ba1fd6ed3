//! Reference data for valuation
//!
//! Price table, brand tiers and the constants the estimator runs on. The
//! built-in tables are the `Default`; a TOML file with the same shape can
//! replace them without touching the estimator.

use super::types::{BrandTier, Trend};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reference data loading errors
#[derive(Debug, Error)]
pub enum ReferenceDataError {
    /// File could not be read
    #[error("Failed to read reference data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// File is not valid TOML for this shape
    #[error("Failed to parse reference data: {0}")]
    Parse(#[from] toml::de::Error),
    /// Parsed, but the values are unusable
    #[error("Invalid reference data: {0}")]
    Invalid(String),
}

/// Age rule mapping a tier's vehicle age to a trend
///
/// Every rule is total: ages outside the rule's window map to `Stable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "direction", rename_all = "snake_case")]
pub enum TrendRule {
    /// Increasing while younger than `below_age` years
    Increasing { below_age: u32 },
    /// Decreasing once older than `above_age` years
    Decreasing { above_age: u32 },
    /// Always stable
    Stable,
}

impl TrendRule {
    /// Apply the rule to a vehicle age
    pub fn evaluate(&self, age: u32) -> Trend {
        match *self {
            TrendRule::Increasing { below_age } if age < below_age => Trend::Increasing,
            TrendRule::Decreasing { above_age } if age > above_age => Trend::Decreasing,
            _ => Trend::Stable,
        }
    }
}

/// Parameters for one brand tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierParams {
    /// Makes in this tier (ignored for the default tier)
    #[serde(default)]
    pub brands: Vec<String>,
    /// Fraction of value lost per year of age
    pub depreciation_rate: Decimal,
    /// Fixed market sentiment; drawn at random when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_condition: Option<Decimal>,
    /// Age rule for the trend label
    pub trend: TrendRule,
}

/// The four brand tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub high_retention: TierParams,
    pub reliable_mainstream: TierParams,
    pub luxury: TierParams,
    pub default: TierParams,
}

impl TierTable {
    /// Parameters for a tier
    pub fn get(&self, tier: BrandTier) -> &TierParams {
        match tier {
            BrandTier::HighRetention => &self.high_retention,
            BrandTier::ReliableMainstream => &self.reliable_mainstream,
            BrandTier::Luxury => &self.luxury,
            BrandTier::Default => &self.default,
        }
    }
}

/// Constants for the diagnostic factor breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorParams {
    /// Age impact lost per year
    pub age_impact_per_year: Decimal,
    /// Mileage baseline per year of age
    pub expected_miles_per_year: u32,
    /// Mileage delta divisor
    pub mileage_divisor: Decimal,
    /// Half-width of the uniform range used when a factor is unknown
    pub random_spread: Decimal,
}

/// Monthly drift and noise for the projection series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParams {
    /// Drift magnitude per month; sign follows the trend
    pub monthly_drift: Decimal,
    /// Half-width of the uniform noise added each month
    pub monthly_noise: Decimal,
}

/// Everything the estimator looks up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    /// Base price when neither the table nor a purchase price applies
    pub default_price: Decimal,
    /// Minimum retained fraction of the base price
    pub depreciation_floor: Decimal,
    pub factors: FactorParams,
    pub projection: ProjectionParams,
    pub tiers: TierTable,
    /// make -> model -> reference price
    pub prices: BTreeMap<String, BTreeMap<String, Decimal>>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self {
            default_price: dec!(25000),
            depreciation_floor: dec!(0.3),
            factors: FactorParams {
                age_impact_per_year: dec!(0.025),
                expected_miles_per_year: 12_000,
                mileage_divisor: dec!(100000),
                random_spread: dec!(0.05),
            },
            projection: ProjectionParams {
                monthly_drift: dec!(0.01),
                monthly_noise: dec!(0.005),
            },
            tiers: TierTable {
                high_retention: TierParams {
                    brands: brands(&["Toyota", "Honda", "Lexus", "Subaru", "Porsche"]),
                    depreciation_rate: dec!(0.08),
                    market_condition: Some(dec!(0.05)),
                    trend: TrendRule::Increasing { below_age: 3 },
                },
                reliable_mainstream: TierParams {
                    brands: brands(&[
                        "Mazda",
                        "Hyundai",
                        "Kia",
                        "Ford",
                        "Chevrolet",
                        "Nissan",
                        "Volkswagen",
                    ]),
                    depreciation_rate: dec!(0.12),
                    market_condition: Some(dec!(0.02)),
                    trend: TrendRule::Decreasing { above_age: 8 },
                },
                luxury: TierParams {
                    brands: brands(&[
                        "BMW",
                        "Mercedes-Benz",
                        "Audi",
                        "Tesla",
                        "Jaguar",
                        "Land Rover",
                        "Maserati",
                    ]),
                    depreciation_rate: dec!(0.15),
                    market_condition: Some(dec!(-0.03)),
                    trend: TrendRule::Decreasing { above_age: 4 },
                },
                default: TierParams {
                    brands: Vec::new(),
                    depreciation_rate: dec!(0.18),
                    market_condition: None,
                    trend: TrendRule::Decreasing { above_age: 10 },
                },
            },
            prices: default_prices(),
        }
    }
}

fn brands(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

fn default_prices() -> BTreeMap<String, BTreeMap<String, Decimal>> {
    let table: [(&str, &[(&str, Decimal)]); 6] = [
        (
            "Tesla",
            &[
                ("Model 3", dec!(45000)),
                ("Model Y", dec!(52000)),
                ("Model S", dec!(90000)),
            ],
        ),
        (
            "Toyota",
            &[
                ("Camry", dec!(28000)),
                ("Corolla", dec!(22000)),
                ("RAV4", dec!(30000)),
            ],
        ),
        (
            "Honda",
            &[
                ("Civic", dec!(24000)),
                ("Accord", dec!(28000)),
                ("CR-V", dec!(31000)),
            ],
        ),
        (
            "Ford",
            &[
                ("F-150", dec!(40000)),
                ("Mustang", dec!(35000)),
                ("Escape", dec!(29000)),
            ],
        ),
        ("BMW", &[("3 Series", dec!(44000)), ("X5", dec!(65000))]),
        (
            "Mercedes-Benz",
            &[("C-Class", dec!(46000)), ("E-Class", dec!(58000))],
        ),
    ];

    table
        .iter()
        .map(|(make, models)| {
            let models = models
                .iter()
                .map(|(model, price)| (model.to_string(), *price))
                .collect();
            (make.to_string(), models)
        })
        .collect()
}

/// Case-insensitive comparison ignoring surrounding whitespace
fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

impl ReferenceData {
    /// Load and validate reference data from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReferenceDataError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate reference data from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ReferenceDataError> {
        let data: ReferenceData = toml::from_str(content)?;
        data.validate()?;
        Ok(data)
    }

    /// Reject values the estimator cannot work with
    pub fn validate(&self) -> Result<(), ReferenceDataError> {
        let invalid = |msg: String| Err(ReferenceDataError::Invalid(msg));

        if self.default_price <= Decimal::ZERO {
            return invalid(format!("default_price must be positive, got {}", self.default_price));
        }
        if self.depreciation_floor <= Decimal::ZERO || self.depreciation_floor > Decimal::ONE {
            return invalid(format!(
                "depreciation_floor must be in (0, 1], got {}",
                self.depreciation_floor
            ));
        }
        if self.factors.mileage_divisor <= Decimal::ZERO {
            return invalid(format!(
                "mileage_divisor must be positive, got {}",
                self.factors.mileage_divisor
            ));
        }
        if self.factors.random_spread < Decimal::ZERO {
            return invalid(format!(
                "random_spread must not be negative, got {}",
                self.factors.random_spread
            ));
        }
        if self.projection.monthly_drift < Decimal::ZERO {
            return invalid(format!(
                "monthly_drift must not be negative, got {}",
                self.projection.monthly_drift
            ));
        }
        if self.projection.monthly_drift + self.projection.monthly_noise >= Decimal::ONE {
            return invalid(format!(
                "monthly_drift + monthly_noise must be below 1, got {}",
                self.projection.monthly_drift + self.projection.monthly_noise
            ));
        }
        if self.projection.monthly_noise < Decimal::ZERO {
            return invalid(format!(
                "monthly_noise must not be negative, got {}",
                self.projection.monthly_noise
            ));
        }

        for tier in BrandTier::ALL {
            let rate = self.tiers.get(tier).depreciation_rate;
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return invalid(format!(
                    "{tier} depreciation_rate must be in [0, 1], got {rate}"
                ));
            }
        }

        let listed = [
            BrandTier::HighRetention,
            BrandTier::ReliableMainstream,
            BrandTier::Luxury,
        ];
        for (i, tier) in listed.iter().enumerate() {
            for other in &listed[i + 1..] {
                let clash = self.tiers.get(*tier).brands.iter().find(|brand| {
                    self.tiers
                        .get(*other)
                        .brands
                        .iter()
                        .any(|candidate| same_name(brand, candidate))
                });
                if let Some(brand) = clash {
                    return invalid(format!("brand {brand} is listed in both {tier} and {other}"));
                }
            }
        }

        for (make, models) in &self.prices {
            for (model, price) in models {
                if *price <= Decimal::ZERO {
                    return invalid(format!("price for {make} {model} must be positive, got {price}"));
                }
            }
        }

        Ok(())
    }

    /// Brand tier of a make; unlisted makes fall into the default tier
    pub fn tier_of(&self, make: &str) -> BrandTier {
        [
            BrandTier::HighRetention,
            BrandTier::ReliableMainstream,
            BrandTier::Luxury,
        ]
        .into_iter()
        .find(|tier| {
            self.tiers
                .get(*tier)
                .brands
                .iter()
                .any(|brand| same_name(brand, make))
        })
        .unwrap_or(BrandTier::Default)
    }

    /// Reference price for a (make, model) pair
    pub fn reference_price(&self, make: &str, model: &str) -> Option<Decimal> {
        self.prices
            .iter()
            .find(|(name, _)| same_name(name, make))
            .and_then(|(_, models)| {
                models
                    .iter()
                    .find(|(name, _)| same_name(name, model))
                    .map(|(_, price)| *price)
            })
    }

    /// Trend for a tier at a given age
    pub fn trend_for(&self, tier: BrandTier, age: u32) -> Trend {
        self.tiers.get(tier).trend.evaluate(age)
    }
}
