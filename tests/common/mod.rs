#![allow(dead_code)]

use qa_roi::roi::EstimationRecord;
use serde_json::{json, Value};

/// 100 cases, 0.5 h at $30 manual, 1 h at $40 to automate, 2 h upkeep,
/// 12 cycles, $500 tooling: $18,000 manual vs $5,460 automated.
pub fn login_estimation() -> EstimationRecord {
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

pub fn login_estimation_json() -> Value {
    json!({
        "user_story": "As a user I can log in",
        "total_test_cases": 100,
        "manual_execution_time_per_test_hrs": 0.5,
        "manual_cost_per_hour": 30,
        "automation_dev_time_per_test_hrs": 1.0,
        "automation_cost_per_hour": 40,
        "automation_maintenance_time_per_cycle_hrs": 2.0,
        "execution_cycles_per_year": 12,
        "tooling_cost_per_year": 500,
        "estimation_reasoning": "One form, three validation paths"
    })
}
