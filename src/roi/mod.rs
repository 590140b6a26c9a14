//! ROI engine: manual vs automated testing cost, what-if scenarios and the
//! automation recommendation.
//!
//! Every function here is pure. The only ordering constraint is that a
//! what-if scenario needs the base costs of an already computed [`RoiResult`].

pub mod decision;
pub mod heuristics;
pub mod models;

#[cfg(test)]
mod tests;

use crate::errors::RoiError;

pub use decision::{compute_decision, DecisionPolicy, MIN_ROI_PERCENTAGE, MIN_SUITABILITY_SCORE};
pub use heuristics::{compute_confidence, compute_suitability};
pub use models::{
    CostBreakdown, EnrichedRecord, EstimationRecord, RoiResult, RoiWarning, WhatIfScenario,
};

/// Decimal places kept on monetary values and ROI percentages.
pub const COST_PRECISION: i32 = 2;
/// Decimal places kept on break-even cycles.
pub const BREAK_EVEN_PRECISION: i32 = 1;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // too large to carry a fractional part
        return value;
    }
    scaled.round() / factor
}

/// Unrounded cost components of an estimation.
pub fn cost_breakdown(record: &EstimationRecord) -> CostBreakdown {
    let cases = record.total_test_cases as f64;
    let cycles = record.execution_cycles_per_year as f64;

    CostBreakdown {
        manual_testing_cost: cases
            * record.manual_execution_time_per_test_hrs
            * record.manual_cost_per_hour
            * cycles,
        automation_development_cost: cases
            * record.automation_dev_time_per_test_hrs
            * record.automation_cost_per_hour,
        automation_maintenance_cost: record.automation_maintenance_time_per_cycle_hrs
            * record.automation_cost_per_hour
            * cycles,
        automation_execution_cost: record.automation_execution_cost_per_cycle * cycles,
        tooling_cost: record.tooling_cost_per_year,
    }
}

/// Percentage saved by automation relative to its cost, from unrounded costs.
///
/// `quantity` names the denominator in the error when it is zero.
fn roi_percentage(manual_cost: f64, automation_cost: f64, quantity: &str) -> Result<f64, RoiError> {
    if automation_cost == 0.0 {
        return Err(RoiError::division_by_zero(quantity));
    }
    let roi = finite(
        "roi_percentage",
        (manual_cost - automation_cost) / automation_cost * 100.0,
    )?;
    Ok(round_to(roi, COST_PRECISION))
}

fn finite(quantity: &str, value: f64) -> Result<f64, RoiError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RoiError::invalid(quantity, "overflows"))
    }
}

/// Compute manual cost, automation cost, ROI and break-even cycles.
///
/// ROI and break-even are taken from the unrounded costs; only the reported
/// values are rounded.
pub fn compute_roi(record: &EstimationRecord) -> Result<RoiResult, RoiError> {
    record.validate()?;

    let costs = cost_breakdown(record);
    costs.check_finite()?;
    let automation_cost = finite("automation_testing_cost", costs.automation_testing_cost())?;
    let roi_percentage = roi_percentage(
        costs.manual_testing_cost,
        automation_cost,
        "automation_testing_cost",
    )?;

    let mut warnings = Vec::new();
    let break_even_cycles = match record.execution_cycles_per_year {
        0 => {
            warnings.push(RoiWarning::ZeroCycles);
            0.0
        }
        cycles => {
            let per_cycle_manual_cost = costs.manual_testing_cost / cycles as f64;
            if per_cycle_manual_cost > 0.0 {
                let cycles_needed = finite(
                    "break_even_cycles",
                    costs.automation_development_cost / per_cycle_manual_cost,
                )?;
                round_to(cycles_needed, BREAK_EVEN_PRECISION)
            } else {
                warnings.push(RoiWarning::NoManualCost);
                0.0
            }
        }
    };

    Ok(RoiResult {
        manual_testing_cost: round_to(costs.manual_testing_cost, COST_PRECISION),
        automation_testing_cost: round_to(automation_cost, COST_PRECISION),
        roi_percentage,
        break_even_cycles,
        warnings,
    })
}

fn scenario(
    manual_cost: f64,
    automation_cost: f64,
    multiplier: f64,
) -> Result<WhatIfScenario, RoiError> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        return Err(RoiError::invalid(
            "what_if_multiplier",
            format!("must be a finite number above 0, got {multiplier}"),
        ));
    }

    let scaled = finite("what_if_automation_cost", automation_cost * multiplier)?;
    let what_if_roi = roi_percentage(manual_cost, scaled, "what_if_automation_cost")?;

    Ok(WhatIfScenario {
        multiplier,
        what_if_automation_cost: round_to(scaled, COST_PRECISION),
        what_if_roi,
    })
}

/// Scale the automation cost of `result` and recompute ROI against `manual_cost`.
///
/// Any finite multiplier above zero is accepted; the 0.5–2.0 range offered
/// by front ends is a convention, not a limit. `result` only carries rounded
/// costs, so at multiplier `1.0` the ROI can differ from
/// `result.roi_percentage` by the effect of cent rounding.
/// [`EnrichedRecord::what_if`] works from the estimation and has no such drift.
pub fn apply_what_if(
    result: &RoiResult,
    manual_cost: f64,
    multiplier: f64,
) -> Result<WhatIfScenario, RoiError> {
    scenario(manual_cost, result.automation_testing_cost, multiplier)
}

impl RoiResult {
    /// What-if scenario against this result's own manual cost.
    pub fn what_if(&self, multiplier: f64) -> Result<WhatIfScenario, RoiError> {
        apply_what_if(self, self.manual_testing_cost, multiplier)
    }
}

impl EnrichedRecord {
    /// What-if scenario from the unrounded costs of the stored estimation.
    ///
    /// At multiplier `1.0` this reproduces `roi` exactly.
    pub fn what_if(&self, multiplier: f64) -> Result<WhatIfScenario, RoiError> {
        let costs = cost_breakdown(&self.estimation);
        scenario(
            costs.manual_testing_cost,
            costs.automation_testing_cost(),
            multiplier,
        )
    }

    /// Recompute the what-if fields for a new multiplier.
    ///
    /// Base costs, suitability, decision and confidence are left untouched;
    /// on error the record is unchanged.
    pub fn apply_multiplier(&mut self, multiplier: f64) -> Result<(), RoiError> {
        self.what_if = self.what_if(multiplier)?;
        Ok(())
    }
}

/// Computes enriched ROI records under a fixed decision policy.
#[derive(Debug, Clone, Default)]
pub struct RoiCalculator {
    policy: DecisionPolicy,
}

impl RoiCalculator {
    pub fn new(policy: DecisionPolicy) -> Self {
        Self { policy }
    }

    /// Run the full chain for one story: ROI, suitability, what-if,
    /// decision and confidence.
    pub fn enrich(
        &self,
        user_story: impl Into<String>,
        estimation_reasoning: Option<String>,
        estimation: EstimationRecord,
        multiplier: f64,
    ) -> Result<EnrichedRecord, RoiError> {
        let roi = compute_roi(&estimation)?;
        let costs = cost_breakdown(&estimation);
        let what_if = scenario(
            costs.manual_testing_cost,
            costs.automation_testing_cost(),
            multiplier,
        )?;

        let automation_suitability_score = compute_suitability(
            estimation.automation_dev_time_per_test_hrs,
            estimation.automation_maintenance_time_per_cycle_hrs,
        );
        let automation_recommended = self
            .policy
            .recommends(roi.roi_percentage, automation_suitability_score);
        let estimation_confidence = compute_confidence(
            estimation.automation_maintenance_time_per_cycle_hrs,
            estimation.automation_dev_time_per_test_hrs,
        );

        Ok(EnrichedRecord {
            user_story: user_story.into(),
            estimation_reasoning,
            estimation,
            roi,
            automation_suitability_score,
            what_if,
            automation_recommended,
            estimation_confidence,
        })
    }
}
