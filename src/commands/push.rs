use anyhow::{Context, Result};
use std::path::Path;

use super::{read_report, resolve_config};
use crate::tracker::{push_test_cases, JiraClient};

/// Create one ticket per test case in a saved report.
///
/// Fails when any ticket was rejected, after attempting all of them.
pub fn handle_push(report: &Path, config: Option<&Path>) -> Result<()> {
    let (_, config) = resolve_config(config)?;
    let report = read_report(report)?;

    if report.test_cases.is_empty() {
        println!("Report has no test cases; nothing to push.");
        return Ok(());
    }

    let tracker = JiraClient::from_config(&config.tracker).context("Issue tracker unavailable")?;
    let outcomes = push_test_cases(&tracker, &report.test_cases);

    let mut failed = 0;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(issue) => println!("{}  {}", issue.key, outcome.test_case.display_title()),
            Err(e) => {
                failed += 1;
                eprintln!("FAILED  {}: {}", outcome.test_case.display_title(), e);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} tickets could not be created", failed, outcomes.len());
    }
    Ok(())
}
