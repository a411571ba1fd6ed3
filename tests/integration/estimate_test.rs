//! Integration tests for the valuation estimator

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vehicle_valuation::valuation::{
    BasePriceSource, DepreciationModel, ReferenceData, Trend, ValuationModel, VehicleDescriptor,
};

const YEAR: i32 = 2026;
const TRIALS: u64 = 500;

fn model() -> DepreciationModel {
    DepreciationModel::with_current_year(ReferenceData::default(), YEAR)
}

/// Mean of projection[3] - projection[0] over seeded trials
fn mean_projected_change(vehicle: &VehicleDescriptor) -> (Trend, Decimal) {
    let model = model();
    let mut total = Decimal::ZERO;
    let mut trend = None;
    for seed in 0..TRIALS {
        let result = model.estimate(vehicle, &mut StdRng::seed_from_u64(seed));
        trend = Some(result.trend);
        total += result.projected_change();
    }
    (trend.unwrap(), total / Decimal::from(TRIALS))
}

#[test]
fn test_every_table_entry_uses_table_price() {
    let reference = ReferenceData::default();
    let model = model();
    let mut rng = StdRng::seed_from_u64(1);

    for (make, models) in &reference.prices {
        for (name, price) in models {
            let vehicle = VehicleDescriptor::new(make.clone(), name.clone(), YEAR - 2)
                .with_purchase_price(dec!(1));
            let result = model.estimate(&vehicle, &mut rng);
            assert_eq!(result.base_price, *price, "{make} {name}");
            assert_eq!(result.base_price_source, BasePriceSource::ReferenceTable);
        }
    }
}

#[test]
fn test_value_between_floor_and_base_for_all_ages() {
    let model = model();
    let mut rng = StdRng::seed_from_u64(2);
    let makes = ["Toyota", "Ford", "BMW", "Lada"];
    let prices = [dec!(31000), dec!(12345.15), dec!(9999.99), dec!(777.77), dec!(0.05)];

    for make in makes {
        for price in prices {
            for age in 0..80 {
                let vehicle = VehicleDescriptor::new(make, "Anything", YEAR - age)
                    .with_purchase_price(price);
                let result = model.estimate(&vehicle, &mut rng);
                assert_eq!(result.base_price, price);
                assert!(
                    result.current_value <= result.base_price,
                    "{make} {price} age {age}: {}",
                    result.current_value
                );
                assert!(
                    result.current_value >= result.base_price * dec!(0.3),
                    "{make} {price} age {age}: {}",
                    result.current_value
                );
                assert!(result.current_value > Decimal::ZERO);
            }
        }
    }
}

#[test]
fn test_projection_shape_across_seeds() {
    let model = model();
    let vehicle = VehicleDescriptor::new("Mazda", "CX-5", YEAR - 5);
    for seed in 0..50 {
        let result = model.estimate(&vehicle, &mut StdRng::seed_from_u64(seed));
        let offsets: Vec<u32> = result.projection.iter().map(|p| p.month_offset).collect();
        assert_eq!(offsets, vec![0, 1, 2, 3]);
    }
}

#[test]
fn test_trend_deterministic_across_seeds() {
    let model = model();
    for make in ["Honda", "Hyundai", "Audi", "Lada"] {
        for age in [0, 2, 5, 9, 15] {
            let vehicle = VehicleDescriptor::new(make, "Any", YEAR - age);
            let a = model.estimate(&vehicle, &mut StdRng::seed_from_u64(10));
            let b = model.estimate(&vehicle, &mut StdRng::seed_from_u64(20));
            assert_eq!(a.trend, b.trend, "{make} age {age}");
        }
    }
}

#[test]
fn test_increasing_projection_drifts_up() {
    let (trend, change) = mean_projected_change(&VehicleDescriptor::new("Toyota", "Camry", YEAR));
    assert_eq!(trend, Trend::Increasing);
    assert!(change > Decimal::ZERO, "mean change {change}");
}

#[test]
fn test_decreasing_projection_drifts_down() {
    let (trend, change) = mean_projected_change(&VehicleDescriptor::new("BMW", "X5", YEAR - 7));
    assert_eq!(trend, Trend::Decreasing);
    assert!(change < Decimal::ZERO, "mean change {change}");
}

#[test]
fn test_stable_projection_stays_near_current_value() {
    let vehicle = VehicleDescriptor::new("Ford", "F-150", YEAR - 3);
    let current = model()
        .estimate(&vehicle, &mut StdRng::seed_from_u64(0))
        .current_value;
    let (trend, change) = mean_projected_change(&vehicle);
    assert_eq!(trend, Trend::Stable);
    // Mean drift well under half a percent of the value
    assert!(change.abs() < current * dec!(0.005), "mean change {change}");
}

#[test]
fn test_tesla_model_3_new() {
    let vehicle = VehicleDescriptor::new("Tesla", "Model 3", YEAR);
    let result = model().estimate(&vehicle, &mut StdRng::seed_from_u64(3));
    assert_eq!(result.base_price, dec!(45000));
    assert_eq!(result.current_value, dec!(45000));
}

#[test]
fn test_unknown_fifty_year_old_vehicle() {
    let vehicle = VehicleDescriptor::new("Unknown", "X", YEAR - 50).with_purchase_price(dec!(10000));
    let result = model().estimate(&vehicle, &mut StdRng::seed_from_u64(3));
    assert_eq!(result.base_price, dec!(10000));
    assert_eq!(result.current_value, dec!(3000));
}

#[test]
fn test_custom_reference_data_changes_estimate() {
    let mut reference = ReferenceData::default();
    reference.default_price = dec!(12000);
    reference.tiers.default.depreciation_rate = dec!(0.1);
    let model = DepreciationModel::with_current_year(reference, YEAR);

    let vehicle = VehicleDescriptor::new("Lada", "Niva", YEAR - 2);
    let result = model.estimate(&vehicle, &mut StdRng::seed_from_u64(4));
    assert_eq!(result.base_price, dec!(12000));
    assert_eq!(result.current_value, dec!(9600));
}

#[test]
fn test_result_serializes_for_presentation() {
    let vehicle = VehicleDescriptor::new("Honda", "CR-V", YEAR - 1).with_mileage(9_000);
    let result = model().estimate(&vehicle, &mut StdRng::seed_from_u64(5));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["trend"], "increasing");
    assert_eq!(json["tier"], "high_retention");
    assert_eq!(json["base_price_source"], "reference_table");
    assert!(json["factors"]["mileage_impact"].is_string());
}
