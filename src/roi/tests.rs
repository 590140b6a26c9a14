use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn scenario_record() -> EstimationRecord {
    EstimationRecord {
        total_test_cases: 100,
        manual_execution_time_per_test_hrs: 0.5,
        manual_cost_per_hour: 30.0,
        automation_dev_time_per_test_hrs: 1.0,
        automation_cost_per_hour: 40.0,
        automation_maintenance_time_per_cycle_hrs: 2.0,
        execution_cycles_per_year: 12,
        tooling_cost_per_year: 500.0,
        automation_execution_cost_per_cycle: 0.0,
    }
}

#[test]
fn test_reference_scenario() {
    let result = compute_roi(&scenario_record()).unwrap();

    assert_eq!(
        result,
        RoiResult {
            manual_testing_cost: 18000.0,
            automation_testing_cost: 5460.0,
            roi_percentage: 229.67,
            break_even_cycles: 2.7,
            warnings: vec![],
        }
    );
}

#[test]
fn test_cost_breakdown_components() {
    let costs = cost_breakdown(&scenario_record());

    assert_eq!(costs.automation_development_cost, 4000.0);
    assert_eq!(costs.automation_maintenance_cost, 960.0);
    assert_eq!(costs.automation_execution_cost, 0.0);
    assert_eq!(costs.automation_testing_cost(), 5460.0);
}

#[test]
fn test_execution_cost_per_cycle_is_added() {
    let record = EstimationRecord {
        automation_execution_cost_per_cycle: 25.0,
        ..scenario_record()
    };

    let result = compute_roi(&record).unwrap();

    assert_eq!(result.automation_testing_cost, 5460.0 + 25.0 * 12.0);
}

#[test]
fn test_zero_cycles_short_circuits_break_even() {
    let record = EstimationRecord {
        execution_cycles_per_year: 0,
        ..scenario_record()
    };

    let result = compute_roi(&record).unwrap();

    assert_eq!(result.break_even_cycles, 0.0);
    assert_eq!(result.manual_testing_cost, 0.0);
    assert_eq!(result.automation_testing_cost, 4500.0);
    assert_eq!(result.roi_percentage, -100.0);
    assert!(result.has_warning(RoiWarning::ZeroCycles));
}

#[test]
fn test_free_manual_testing_gives_zero_break_even() {
    let record = EstimationRecord {
        manual_cost_per_hour: 0.0,
        ..scenario_record()
    };

    let result = compute_roi(&record).unwrap();

    assert_eq!(result.break_even_cycles, 0.0);
    assert_eq!(result.warnings, vec![RoiWarning::NoManualCost]);
}

#[test]
fn test_zero_automation_cost_is_a_typed_error() {
    let record = EstimationRecord {
        automation_dev_time_per_test_hrs: 0.0,
        automation_maintenance_time_per_cycle_hrs: 0.0,
        tooling_cost_per_year: 0.0,
        automation_execution_cost_per_cycle: 0.0,
        ..scenario_record()
    };

    let err = compute_roi(&record).unwrap_err();

    assert_eq!(err, RoiError::division_by_zero("automation_testing_cost"));
}

#[test]
fn test_negative_input_rejected_before_computing() {
    let record = EstimationRecord {
        tooling_cost_per_year: -1.0,
        ..scenario_record()
    };

    let err = compute_roi(&record).unwrap_err();

    assert_eq!(err.field(), Some("tooling_cost_per_year"));
}

#[test]
fn test_non_finite_input_rejected() {
    let record = EstimationRecord {
        manual_cost_per_hour: f64::NAN,
        ..scenario_record()
    };

    assert!(matches!(
        compute_roi(&record),
        Err(RoiError::InvalidInput { ref field, .. }) if field == "manual_cost_per_hour"
    ));
}

#[test]
fn test_what_if_scales_automation_cost() {
    let result = compute_roi(&scenario_record()).unwrap();

    let scenario = apply_what_if(&result, result.manual_testing_cost, 2.0).unwrap();

    assert_eq!(scenario.what_if_automation_cost, 10920.0);
    assert_eq!(scenario.what_if_roi, 64.84);
    assert_eq!(scenario.multiplier, 2.0);
}

#[test]
fn test_what_if_is_repeatable() {
    let result = compute_roi(&scenario_record()).unwrap();

    let first = result.what_if(1.5).unwrap();
    let _ = result.what_if(0.5).unwrap();
    let again = result.what_if(1.5).unwrap();

    assert_eq!(first, again);
}

#[test]
fn test_what_if_rejects_non_positive_multiplier() {
    let result = compute_roi(&scenario_record()).unwrap();

    for multiplier in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let err = result.what_if(multiplier).unwrap_err();
        assert_eq!(err.field(), Some("what_if_multiplier"));
    }
}

#[test]
fn test_what_if_accepts_values_outside_slider_range() {
    let result = compute_roi(&scenario_record()).unwrap();

    assert!(result.what_if(0.1).is_ok());
    assert!(result.what_if(10.0).is_ok());
}

#[test]
fn test_sub_cent_what_if_is_not_a_division_error() {
    let tiny = RoiResult {
        manual_testing_cost: 10.0,
        automation_testing_cost: 0.01,
        roi_percentage: 99900.0,
        break_even_cycles: 0.0,
        warnings: vec![],
    };

    let scenario = tiny.what_if(0.1).unwrap();

    assert_eq!(scenario.what_if_automation_cost, 0.0);
    assert_eq!(scenario.what_if_roi, 999900.0);
}

#[test]
fn test_roi_uses_unrounded_automation_cost() {
    // manual 2.00, automation 1.004: exact ROI is 99.2, not the 100 a
    // cent-rounded cost would give
    let record = EstimationRecord {
        total_test_cases: 1,
        manual_execution_time_per_test_hrs: 1.0,
        manual_cost_per_hour: 2.0,
        automation_dev_time_per_test_hrs: 1.0,
        automation_cost_per_hour: 1.0,
        automation_maintenance_time_per_cycle_hrs: 0.0,
        execution_cycles_per_year: 1,
        tooling_cost_per_year: 0.004,
        automation_execution_cost_per_cycle: 0.0,
    };

    let result = compute_roi(&record).unwrap();

    assert_eq!(result.automation_testing_cost, 1.0);
    assert_eq!(result.roi_percentage, 99.2);
}

#[test]
fn test_sub_cent_automation_cost_is_not_zero() {
    let record = EstimationRecord {
        automation_dev_time_per_test_hrs: 0.0,
        automation_maintenance_time_per_cycle_hrs: 0.0,
        tooling_cost_per_year: 0.004,
        automation_execution_cost_per_cycle: 0.0,
        ..scenario_record()
    };

    let result = compute_roi(&record).unwrap();

    assert_eq!(result.automation_testing_cost, 0.0);
    assert_eq!(result.roi_percentage, round_to((18000.0 - 0.004) / 0.004 * 100.0, 2));

    let enriched = RoiCalculator::default()
        .enrich("Tiny", None, record, 1.0)
        .unwrap();
    assert_eq!(enriched.what_if.what_if_roi, result.roi_percentage);
}

#[test]
fn test_cost_overflow_rejected() {
    let record = EstimationRecord {
        manual_cost_per_hour: 1e308,
        ..scenario_record()
    };

    let err = compute_roi(&record).unwrap_err();

    assert_eq!(err, RoiError::invalid("manual_testing_cost", "overflows"));
}

#[test]
fn test_roi_overflow_rejected() {
    // both costs finite, but the ratio is not
    let record = EstimationRecord {
        total_test_cases: 1,
        manual_execution_time_per_test_hrs: 1.0,
        manual_cost_per_hour: 1e300,
        automation_dev_time_per_test_hrs: 0.0,
        automation_cost_per_hour: 0.0,
        automation_maintenance_time_per_cycle_hrs: 0.0,
        execution_cycles_per_year: 1,
        tooling_cost_per_year: 1e-300,
        automation_execution_cost_per_cycle: 0.0,
    };

    assert_eq!(
        compute_roi(&record).unwrap_err(),
        RoiError::invalid("roi_percentage", "overflows")
    );
}

#[test]
fn test_what_if_overflow_rejected() {
    let result = compute_roi(&scenario_record()).unwrap();

    let err = result.what_if(f64::MAX).unwrap_err();

    assert_eq!(err.field(), Some("what_if_automation_cost"));
}

#[test]
fn test_enrich_reference_scenario() {
    let calculator = RoiCalculator::default();

    let record = calculator
        .enrich("Login with SSO", Some("Simple flow".into()), scenario_record(), 1.0)
        .unwrap();

    assert_eq!(record.automation_suitability_score, 60);
    assert!(record.automation_recommended);
    assert_eq!(record.estimation_confidence, 75.0);
    assert_eq!(record.what_if.what_if_automation_cost, 5460.0);
    assert_eq!(record.what_if.what_if_roi, 229.67);
}

#[test]
fn test_enrich_uses_configured_policy() {
    let calculator = RoiCalculator::new(DecisionPolicy {
        min_roi_percentage: 300.0,
        min_suitability_score: 60,
    });

    let record = calculator
        .enrich("Checkout", None, scenario_record(), 1.0)
        .unwrap();

    assert!(!record.automation_recommended);
}

#[test]
fn test_apply_multiplier_leaves_base_fields() {
    let calculator = RoiCalculator::default();
    let mut record = calculator
        .enrich("Search", None, scenario_record(), 1.0)
        .unwrap();
    let before = record.clone();

    record.apply_multiplier(2.0).unwrap();

    assert_eq!(record.roi, before.roi);
    assert_eq!(record.automation_recommended, before.automation_recommended);
    assert_eq!(record.what_if.what_if_automation_cost, 10920.0);

    assert!(record.apply_multiplier(0.0).is_err());
    assert_eq!(record.what_if.multiplier, 2.0);
}

#[test]
fn test_enriched_record_field_names_are_flat() {
    let record = RoiCalculator::default()
        .enrich("Profile", None, scenario_record(), 1.2)
        .unwrap();

    let value = serde_json::to_value(&record).unwrap();

    for key in [
        "user_story",
        "total_test_cases",
        "execution_cycles_per_year",
        "manual_testing_cost",
        "automation_testing_cost",
        "roi_percentage",
        "break_even_cycles",
        "automation_suitability_score",
        "what_if_multiplier",
        "what_if_automation_cost",
        "what_if_roi",
        "automation_recommended",
        "estimation_confidence",
    ] {
        assert!(value.get(key).is_some(), "missing {key}");
    }
    assert!(value.get("warnings").is_none());

    let back: EnrichedRecord = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_round_to_half_away_from_zero() {
    assert_eq!(round_to(2.25, 1), 2.3);
    assert_eq!(round_to(-2.25, 1), -2.3);
    assert_eq!(round_to(229.665_000_1, 2), 229.67);
    assert_eq!(round_to(1e307, 2), 1e307);
}

fn arb_record() -> impl Strategy<Value = EstimationRecord> {
    (
        0u64..500,
        0.0..10.0f64,
        0.0..200.0f64,
        0.0..10.0f64,
        0.0..200.0f64,
        0.0..20.0f64,
        0u64..60,
        1.0..10_000.0f64,
        0.0..100.0f64,
    )
        .prop_map(
            |(cases, manual_hrs, manual_rate, dev_hrs, auto_rate, maint_hrs, cycles, tooling, exec)| {
                EstimationRecord {
                    total_test_cases: cases,
                    manual_execution_time_per_test_hrs: manual_hrs,
                    manual_cost_per_hour: manual_rate,
                    automation_dev_time_per_test_hrs: dev_hrs,
                    automation_cost_per_hour: auto_rate,
                    automation_maintenance_time_per_cycle_hrs: maint_hrs,
                    execution_cycles_per_year: cycles,
                    tooling_cost_per_year: tooling,
                    automation_execution_cost_per_cycle: exec,
                }
            },
        )
}

proptest! {
    #[test]
    fn automation_cost_covers_fixed_components(record in arb_record()) {
        let costs = cost_breakdown(&record);
        let result = compute_roi(&record).unwrap();

        let fixed = costs.automation_development_cost
            + costs.automation_maintenance_cost
            + costs.tooling_cost;
        prop_assert!(costs.automation_testing_cost() >= fixed);
        prop_assert!(result.automation_testing_cost >= round_to(fixed, COST_PRECISION));
    }

    #[test]
    fn roi_decreases_with_automation_rate(
        record in arb_record(),
        low in 0.0..100.0f64,
        delta in 0.0..100.0f64,
    ) {
        let cheap = EstimationRecord { automation_cost_per_hour: low, ..record };
        let dear = EstimationRecord { automation_cost_per_hour: low + delta, ..record };

        let cheap_roi = compute_roi(&cheap).unwrap().roi_percentage;
        let dear_roi = compute_roi(&dear).unwrap().roi_percentage;
        prop_assert!(cheap_roi >= dear_roi);
    }

    #[test]
    fn unit_multiplier_is_identity(record in arb_record()) {
        let enriched = RoiCalculator::default().enrich("Story", None, record, 1.0).unwrap();

        prop_assert_eq!(enriched.what_if.what_if_automation_cost, enriched.roi.automation_testing_cost);
        prop_assert_eq!(enriched.what_if.what_if_roi, enriched.roi.roi_percentage);
    }

    #[test]
    fn unit_multiplier_on_rounded_costs_stays_within_cent_error(record in arb_record()) {
        let result = compute_roi(&record).unwrap();
        let scenario = result.what_if(1.0).unwrap();

        // each cost is off by at most half a cent, each ROI by half a basis point
        let m = result.manual_testing_cost + 0.005;
        let a = result.automation_testing_cost - 0.005;
        let tolerance = 100.0 * (0.005 / a + m * 0.005 / (a * a)) + 0.01 + 1e-9;

        prop_assert_eq!(scenario.what_if_automation_cost, result.automation_testing_cost);
        prop_assert!((scenario.what_if_roi - result.roi_percentage).abs() <= tolerance);
    }

    #[test]
    fn scores_stay_in_band(dev in 0.0..1_000.0f64, maint in 0.0..1_000.0f64) {
        let suitability = compute_suitability(dev, maint);
        let confidence = compute_confidence(maint, dev);

        prop_assert!(suitability <= 100);
        prop_assert!((50.0..=95.0).contains(&confidence));
    }

    #[test]
    fn decision_requires_both_thresholds(roi in -500.0..500.0f64, score in 0u8..=100) {
        prop_assert_eq!(compute_decision(roi, score), roi > 0.0 && score >= 60);
    }
}
