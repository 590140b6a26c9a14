use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RoiError;

/// Raw effort and cost assumptions for one user story.
///
/// Build it through [`EstimationRecord::from_value`](crate::estimation) when the
/// numbers come from an untrusted source; [`EstimationRecord::validate`] is
/// re-run by the engine before every computation either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationRecord {
    pub total_test_cases: u64,
    pub manual_execution_time_per_test_hrs: f64,
    pub manual_cost_per_hour: f64,
    pub automation_dev_time_per_test_hrs: f64,
    pub automation_cost_per_hour: f64,
    pub automation_maintenance_time_per_cycle_hrs: f64,
    pub execution_cycles_per_year: u64,
    pub tooling_cost_per_year: f64,
    #[serde(default)]
    pub automation_execution_cost_per_cycle: f64,
}

impl EstimationRecord {
    /// Float fields paired with their wire names, in declaration order.
    pub fn float_fields(&self) -> [(&'static str, f64); 7] {
        [
            (
                "manual_execution_time_per_test_hrs",
                self.manual_execution_time_per_test_hrs,
            ),
            ("manual_cost_per_hour", self.manual_cost_per_hour),
            (
                "automation_dev_time_per_test_hrs",
                self.automation_dev_time_per_test_hrs,
            ),
            ("automation_cost_per_hour", self.automation_cost_per_hour),
            (
                "automation_maintenance_time_per_cycle_hrs",
                self.automation_maintenance_time_per_cycle_hrs,
            ),
            ("tooling_cost_per_year", self.tooling_cost_per_year),
            (
                "automation_execution_cost_per_cycle",
                self.automation_execution_cost_per_cycle,
            ),
        ]
    }

    /// Reject negative or non-finite values.
    pub fn validate(&self) -> Result<(), RoiError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(RoiError::invalid(field, format!("must be finite, got {value}")));
            }
            if value < 0.0 {
                return Err(RoiError::invalid(
                    field,
                    format!("must be non-negative, got {value}"),
                ));
            }
        }
        Ok(())
    }
}

/// Unrounded intermediate costs of one estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub manual_testing_cost: f64,
    pub automation_development_cost: f64,
    pub automation_maintenance_cost: f64,
    pub automation_execution_cost: f64,
    pub tooling_cost: f64,
}

impl CostBreakdown {
    pub fn automation_testing_cost(&self) -> f64 {
        self.automation_development_cost
            + self.automation_maintenance_cost
            + self.automation_execution_cost
            + self.tooling_cost
    }

    /// Finite inputs can still multiply past `f64::MAX`.
    pub fn check_finite(&self) -> Result<(), RoiError> {
        let components = [
            ("manual_testing_cost", self.manual_testing_cost),
            ("automation_development_cost", self.automation_development_cost),
            ("automation_maintenance_cost", self.automation_maintenance_cost),
            ("automation_execution_cost", self.automation_execution_cost),
            ("tooling_cost", self.tooling_cost),
        ];
        match components.iter().find(|(_, value)| !value.is_finite()) {
            Some((quantity, _)) => Err(RoiError::invalid(*quantity, "overflows")),
            None => Ok(()),
        }
    }
}

/// Non-fatal conditions noticed while computing a [`RoiResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiWarning {
    /// No execution cycles: break-even is reported as 0.
    ZeroCycles,
    /// Cycles exist but manual execution costs nothing: break-even is reported as 0.
    NoManualCost,
}

impl fmt::Display for RoiWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCycles => write!(f, "execution_cycles_per_year is 0; break-even set to 0"),
            Self::NoManualCost => write!(f, "manual cost per cycle is 0; break-even set to 0"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiResult {
    pub manual_testing_cost: f64,
    pub automation_testing_cost: f64,
    pub roi_percentage: f64,
    pub break_even_cycles: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<RoiWarning>,
}

impl RoiResult {
    pub fn net_savings(&self) -> f64 {
        self.manual_testing_cost - self.automation_testing_cost
    }

    pub fn has_warning(&self, warning: RoiWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Automation cost and ROI under a scaled automation budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfScenario {
    #[serde(rename = "what_if_multiplier")]
    pub multiplier: f64,
    pub what_if_automation_cost: f64,
    pub what_if_roi: f64,
}

/// A story's ROI result plus the derived suitability, scenario and decision fields.
///
/// Serialized flat; the export and dashboard layers key off these field names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub user_story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimation_reasoning: Option<String>,
    #[serde(flatten)]
    pub estimation: EstimationRecord,
    #[serde(flatten)]
    pub roi: RoiResult,
    pub automation_suitability_score: u8,
    #[serde(flatten)]
    pub what_if: WhatIfScenario,
    pub automation_recommended: bool,
    pub estimation_confidence: f64,
}
