//! Per-story orchestration: estimation, ROI enrichment and test cases.
//!
//! All state of one analysis run lives in an [`AnalysisContext`] owned by the
//! caller. Nothing here is process-wide, so independent runs (or tests) never
//! see each other's rows.

use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info_span, warn};

use crate::config::Standards;
use crate::errors::{AnalysisError, RoiError};
use crate::estimation::EstimationResponse;
use crate::llm::{estimation_prompt, test_case_prompt, CompletionBackend};
use crate::roi::{DecisionPolicy, EnrichedRecord, RoiCalculator};
use crate::summary::PortfolioSummary;
use crate::testcases::{parse_test_cases, TestCase};


/// Outcome of one successfully analysed story.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryAnalysis {
    pub record: EnrichedRecord,
    pub test_cases: Vec<TestCase>,
}

/// A story that could not be analysed, kept so the report can show it inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryFailure {
    pub user_story: String,
    pub error: String,
    pub transient: bool,
}

impl StoryFailure {
    pub fn new(user_story: impl Into<String>, error: &AnalysisError) -> Self {
        Self {
            user_story: user_story.into(),
            error: error.to_string(),
            transient: error.is_transient(),
        }
    }
}

/// Rows accumulated during one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisContext {
    calculator: RoiCalculator,
    multiplier: f64,
    analyses: Vec<StoryAnalysis>,
    failures: Vec<StoryFailure>,
}

impl AnalysisContext {
    pub fn new(policy: DecisionPolicy, multiplier: f64) -> Self {
        Self {
            calculator: RoiCalculator::new(policy),
            multiplier,
            analyses: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn calculator(&self) -> &RoiCalculator {
        &self.calculator
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn analyses(&self) -> &[StoryAnalysis] {
        &self.analyses
    }

    pub fn failures(&self) -> &[StoryFailure] {
        &self.failures
    }

    pub fn records(&self) -> impl Iterator<Item = &EnrichedRecord> {
        self.analyses.iter().map(|a| &a.record)
    }

    pub fn test_cases(&self) -> impl Iterator<Item = &TestCase> {
        self.analyses.iter().flat_map(|a| a.test_cases.iter())
    }

    pub fn summary(&self) -> PortfolioSummary {
        PortfolioSummary::from_records(self.records())
    }

    pub fn is_empty(&self) -> bool {
        self.analyses.is_empty() && self.failures.is_empty()
    }

    /// Drop all rows; a new run always starts from scratch.
    pub fn clear(&mut self) {
        self.analyses.clear();
        self.failures.clear();
    }

    pub fn push_analysis(&mut self, analysis: StoryAnalysis) {
        self.analyses.push(analysis);
    }

    pub fn push_failure(&mut self, failure: StoryFailure) {
        self.failures.push(failure);
    }

    fn record_outcome(&mut self, story: &str, outcome: Result<StoryAnalysis, AnalysisError>) {
        match outcome {
            Ok(analysis) => self.push_analysis(analysis),
            Err(e) => {
                warn!(story = %story, error = %e, "story analysis failed");
                self.push_failure(StoryFailure::new(story, &e));
            }
        }
    }

    /// Recompute the what-if fields of every row for `multiplier`.
    ///
    /// Base costs are never touched. Either every row is updated or, on
    /// error, none is.
    pub fn set_multiplier(&mut self, multiplier: f64) -> Result<(), RoiError> {
        let scenarios = self
            .analyses
            .iter()
            .map(|a| a.record.what_if(multiplier))
            .collect::<Result<Vec<_>, _>>()?;

        for (analysis, scenario) in self.analyses.iter_mut().zip(scenarios) {
            analysis.record.what_if = scenario;
        }
        self.multiplier = multiplier;
        Ok(())
    }
}

/// One user story per non-blank line, trimmed.
pub fn split_stories(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Drives the completion backend for each story.
pub struct StoryAnalyzer<B> {
    backend: B,
    standards: Standards,
}

impl<B: CompletionBackend> StoryAnalyzer<B> {
    pub fn new(backend: B, standards: Standards) -> Self {
        Self { backend, standards }
    }

    /// Estimation, ROI enrichment, then test cases.
    pub fn analyze_story(
        &self,
        story: &str,
        calculator: &RoiCalculator,
        multiplier: f64,
    ) -> Result<StoryAnalysis, AnalysisError> {
        let _span = info_span!("story", story = %story).entered();

        let raw = self
            .backend
            .complete(&estimation_prompt(&self.standards.qa_estimation, story))?;
        let estimation = EstimationResponse::from_llm_output(&raw)?;

        let record = calculator.enrich(story, estimation.reasoning, estimation.record, multiplier)?;
        for warning in &record.roi.warnings {
            warn!(story = %story, "{}", warning);
        }

        let raw = self
            .backend
            .complete(&test_case_prompt(&self.standards.testing, story))?;
        let test_cases =
            parse_test_cases(&raw, story).map_err(|e| AnalysisError::TestCases(e.to_string()))?;

        tracing::debug!(
            roi = record.roi.roi_percentage,
            test_cases = test_cases.len(),
            "story analysed"
        );
        Ok(StoryAnalysis { record, test_cases })
    }

    /// Analyse `stories` in parallel and append the outcomes to `ctx` in input order.
    ///
    /// A failing story is recorded as a failure and does not stop the batch.
    pub fn analyze_batch(&self, stories: &[String], ctx: &mut AnalysisContext, progress: &ProgressBar) {
        let calculator = ctx.calculator().clone();
        let multiplier = ctx.multiplier();

        let outcomes: Vec<_> = stories
            .par_iter()
            .map(|story| {
                let outcome = self.analyze_story(story, &calculator, multiplier);
                progress.inc(1);
                (story, outcome)
            })
            .collect();

        for (story, outcome) in outcomes {
            ctx.record_outcome(story, outcome);
        }
    }
}
