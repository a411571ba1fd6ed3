//! Integration tests for configuration and reference data loading

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;
use std::io::Write;
use vehicle_valuation::config::Config;
use vehicle_valuation::valuation::{
    BrandTier, DepreciationModel, ReferenceData, ValuationModel, VehicleDescriptor,
};

#[test]
fn test_config_with_reference_file() {
    let dir = tempfile::tempdir().unwrap();

    let mut reference = ReferenceData::default();
    reference.tiers.high_retention.brands.push("Volvo".to_string());
    reference
        .prices
        .entry("Volvo".to_string())
        .or_default()
        .insert("XC60".to_string(), dec!(48000));
    let reference_path = dir.path().join("reference.toml");
    std::fs::write(&reference_path, toml::to_string_pretty(&reference).unwrap()).unwrap();

    let config_path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(file, "[telemetry]").unwrap();
    writeln!(file, "log_level = \"warn\"").unwrap();
    writeln!(file, "[valuation]").unwrap();
    writeln!(file, "reference_data = {:?}", reference_path.display().to_string()).unwrap();

    let config = Config::load(&config_path).unwrap();
    let data = config.reference_data().unwrap();
    assert_eq!(data.tier_of("Volvo"), BrandTier::HighRetention);

    let model = DepreciationModel::with_current_year(data, 2026);
    let vehicle = VehicleDescriptor::new("Volvo", "XC60", 2026);
    let result = model.estimate(&vehicle, &mut StdRng::seed_from_u64(1));
    assert_eq!(result.current_value, dec!(48000));
}

#[test]
fn test_invalid_reference_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut reference = ReferenceData::default();
    reference.depreciation_floor = dec!(2);
    let reference_path = dir.path().join("reference.toml");
    std::fs::write(&reference_path, toml::to_string_pretty(&reference).unwrap()).unwrap();

    assert!(ReferenceData::load(&reference_path).is_err());
}

#[test]
fn test_bundled_example_config() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert!(config.valuation.reference_data.is_none());
    assert_eq!(config.reference_data().unwrap(), ReferenceData::default());
}
