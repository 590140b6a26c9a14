mod common;

use pretty_assertions::assert_eq;
use qa_roi::roi::{
    apply_what_if, compute_confidence, compute_decision, compute_roi, compute_suitability,
    RoiCalculator, RoiWarning,
};
use qa_roi::{EstimationRecord, RoiError};

#[test]
fn reference_scenario_end_to_end() {
    let result = compute_roi(&common::login_estimation()).unwrap();

    assert_eq!(result.manual_testing_cost, 18000.0);
    assert_eq!(result.automation_testing_cost, 5460.0);
    assert_eq!(result.roi_percentage, 229.67);
    assert_eq!(result.break_even_cycles, 2.7);
    assert!(result.warnings.is_empty());

    let scenario = apply_what_if(&result, result.manual_testing_cost, 2.0).unwrap();
    assert_eq!(scenario.what_if_automation_cost, 10920.0);
    assert_eq!(scenario.what_if_roi, 64.84);

    assert_eq!(compute_suitability(1.0, 2.0), 60);
    assert!(compute_decision(result.roi_percentage, 60));
    assert_eq!(compute_confidence(2.0, 1.0), 75.0);
}

#[test]
fn validated_json_and_struct_agree() {
    let from_json = EstimationRecord::from_value(&common::login_estimation_json()).unwrap();
    assert_eq!(from_json, common::login_estimation());
}

#[test]
fn zero_cycles_is_a_warning_not_an_error() {
    let record = EstimationRecord {
        execution_cycles_per_year: 0,
        ..common::login_estimation()
    };

    let result = compute_roi(&record).unwrap();

    assert_eq!(result.manual_testing_cost, 0.0);
    assert_eq!(result.break_even_cycles, 0.0);
    assert!(result.has_warning(RoiWarning::ZeroCycles));
}

#[test]
fn free_automation_is_a_division_error() {
    let record = EstimationRecord {
        automation_dev_time_per_test_hrs: 0.0,
        automation_maintenance_time_per_cycle_hrs: 0.0,
        tooling_cost_per_year: 0.0,
        ..common::login_estimation()
    };

    assert!(matches!(
        compute_roi(&record),
        Err(RoiError::DivisionByZero { .. })
    ));
}

#[test]
fn what_if_slider_sweep_keeps_base_costs() {
    let mut record = RoiCalculator::default()
        .enrich("Login", None, common::login_estimation(), 1.0)
        .unwrap();
    let base = record.roi.clone();

    for step in 0..=15 {
        let multiplier = 0.5 + step as f64 * 0.1;
        record.apply_multiplier(multiplier).unwrap();
        assert_eq!(record.roi, base);
        assert_eq!(record.what_if.multiplier, multiplier);
    }

    record.apply_multiplier(1.0).unwrap();
    assert_eq!(record.what_if.what_if_automation_cost, base.automation_testing_cost);
    assert_eq!(record.what_if.what_if_roi, base.roi_percentage);
}
