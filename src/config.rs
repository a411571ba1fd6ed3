//! Configuration types for vehicle-valuation

use crate::telemetry::LogFormat;
use crate::valuation::ReferenceData;
use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub valuation: ValuationConfig,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Valuation configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValuationConfig {
    /// TOML file replacing the built-in reference data
    #[serde(default)]
    pub reference_data: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Reference data named by the config, or the built-in tables
    pub fn reference_data(&self) -> anyhow::Result<ReferenceData> {
        match &self.valuation.reference_data {
            Some(path) => {
                let data = ReferenceData::load(path)
                    .with_context(|| format!("loading reference data {}", path.display()))?;
                tracing::info!(path = %path.display(), "Loaded reference data");
                Ok(data)
            }
            None => {
                tracing::debug!("Using built-in reference data");
                Ok(ReferenceData::default())
            }
        }
    }
}
