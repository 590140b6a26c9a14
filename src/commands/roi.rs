use anyhow::{Context, Result};
use std::path::PathBuf;

use super::analyze::ensure_positive_multiplier;
use super::{resolve_config, resolve_format, resolve_multiplier};
use crate::errors::AnalysisError;
use crate::estimation::{clean_llm_json, parse_estimations};
use crate::formatting::FormattingConfig;
use crate::io::{emit_report, OutputFormat, Report};
use crate::pipeline::StoryFailure;
use crate::roi::RoiCalculator;

#[derive(Debug, Clone)]
pub struct RoiConfig {
    pub estimations: PathBuf,
    pub multiplier: Option<f64>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

pub fn handle_roi(args: RoiConfig) -> Result<()> {
    let (_, config) = resolve_config(args.config.as_deref())?;
    let multiplier = resolve_multiplier(args.multiplier, &config);
    ensure_positive_multiplier(multiplier)?;

    let contents = std::fs::read_to_string(&args.estimations)
        .with_context(|| format!("Failed to read {}", args.estimations.display()))?;
    let report = build_roi_report(&contents, &RoiCalculator::new(config.policy), multiplier)
        .with_context(|| format!("Invalid estimation file {}", args.estimations.display()))?;

    emit_report(
        &report,
        resolve_format(args.format, &config),
        args.output.as_deref(),
        args.formatting,
    )
}

/// Enrich every estimation in `contents`; invalid entries become failures.
///
/// Entries without a `user_story` are named `Estimation N` (1-based).
pub fn build_roi_report(
    contents: &str,
    calculator: &RoiCalculator,
    multiplier: f64,
) -> Result<Report> {
    let value = clean_llm_json(contents)?;

    let mut records = Vec::new();
    let mut failures = Vec::new();
    for (index, parsed) in parse_estimations(&value).into_iter().enumerate() {
        let fallback = format!("Estimation {}", index + 1);
        let outcome = parsed.and_then(|response| {
            let story = response.user_story.unwrap_or_else(|| fallback.clone());
            calculator.enrich(story, response.reasoning, response.record, multiplier)
        });

        match outcome {
            Ok(record) => {
                for warning in &record.roi.warnings {
                    tracing::warn!(story = %record.user_story, "{}", warning);
                }
                records.push(record);
            }
            Err(e) => {
                tracing::warn!(entry = %fallback, error = %e, "estimation rejected");
                failures.push(StoryFailure::new(fallback, &AnalysisError::from(e)));
            }
        }
    }

    Ok(Report::new(records, multiplier).with_failures(failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LOGIN: &str = r#"{
        "user_story": "Login",
        "total_test_cases": 100,
        "manual_execution_time_per_test_hrs": 0.5,
        "manual_cost_per_hour": 30,
        "automation_dev_time_per_test_hrs": 1.0,
        "automation_cost_per_hour": 40,
        "automation_maintenance_time_per_cycle_hrs": 2.0,
        "number_of_test_cycles": 12,
        "tool_license_cost": 500
    }"#;

    #[test]
    fn single_object_is_one_row() {
        let report = build_roi_report(LOGIN, &RoiCalculator::default(), 1.0).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].user_story, "Login");
        assert_eq!(report.records[0].roi.roi_percentage, 229.67);
        assert_eq!(report.records[0].roi.break_even_cycles, 2.7);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn bad_entries_become_failures() {
        let contents = format!(r#"[{LOGIN}, {{"total_test_cases": -1}}]"#);

        let report = build_roi_report(&contents, &RoiCalculator::default(), 2.0).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].what_if.what_if_roi, 64.84);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].user_story, "Estimation 2");
        assert!(report.failures[0].error.contains("total_test_cases"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(build_roi_report("{not json", &RoiCalculator::default(), 1.0).is_err());
    }
}
