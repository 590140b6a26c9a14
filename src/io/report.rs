use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::RoiError;
use crate::pipeline::{AnalysisContext, StoryFailure};
use crate::roi::EnrichedRecord;
use crate::summary::{decision_matrix, DecisionRow, PortfolioSummary};
use crate::testcases::TestCase;

/// Everything a writer renders for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub what_if_multiplier: f64,
    pub summary: PortfolioSummary,
    pub records: Vec<EnrichedRecord>,
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
    #[serde(default)]
    pub failures: Vec<StoryFailure>,
}

impl Report {
    pub fn new(records: Vec<EnrichedRecord>, what_if_multiplier: f64) -> Self {
        let summary = PortfolioSummary::from_records(&records);
        Self {
            generated_at: Utc::now(),
            what_if_multiplier,
            summary,
            records,
            test_cases: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn empty(what_if_multiplier: f64) -> Self {
        Self::new(Vec::new(), what_if_multiplier)
    }

    pub fn from_context(ctx: &AnalysisContext) -> Self {
        let mut report = Self::new(ctx.records().cloned().collect(), ctx.multiplier());
        report.test_cases = ctx.test_cases().cloned().collect();
        report.failures = ctx.failures().to_vec();
        report
    }

    pub fn with_failures(mut self, failures: Vec<StoryFailure>) -> Self {
        self.failures = failures;
        self
    }

    pub fn decisions(&self) -> Vec<DecisionRow> {
        decision_matrix(&self.records)
    }

    /// Recompute every row's what-if fields; all rows or none are changed.
    pub fn apply_multiplier(&mut self, multiplier: f64) -> Result<(), RoiError> {
        let scenarios = self
            .records
            .iter()
            .map(|r| r.what_if(multiplier))
            .collect::<Result<Vec<_>, _>>()?;

        for (record, scenario) in self.records.iter_mut().zip(scenarios) {
            record.what_if = scenario;
        }
        self.what_if_multiplier = multiplier;
        Ok(())
    }

    /// Largest manual or automation cost, used to scale the cost chart.
    pub fn max_cost(&self) -> f64 {
        self.records
            .iter()
            .flat_map(|r| [r.roi.manual_testing_cost, r.roi.automation_testing_cost])
            .fold(0.0, f64::max)
    }
}
