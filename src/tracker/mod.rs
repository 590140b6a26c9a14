//! Issue tracker integration: one ticket per generated test case.

pub mod jira;

pub use jira::JiraClient;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::config::TrackerConfig;
use crate::errors::TrackerError;
use crate::testcases::TestCase;

/// Identifier of a ticket the tracker accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    pub key: String,
    pub id: String,
}

pub trait IssueTracker {
    fn create_issue(&self, test_case: &TestCase) -> Result<CreatedIssue, TrackerError>;
}

/// Plain text as an Atlassian Document Format doc, one paragraph per non-blank line.
pub fn to_adf(text: &str) -> Value {
    let content: Vec<Value> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            json!({
                "type": "paragraph",
                "content": [{ "type": "text", "text": line }]
            })
        })
        .collect();

    json!({
        "type": "doc",
        "version": 1,
        "content": content,
    })
}

pub fn describe_test_case(test_case: &TestCase) -> String {
    let steps = test_case
        .steps
        .iter()
        .map(|step| format!("- {step}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Description:\n{}\n\nPreconditions:\n{}\n\nSteps:\n{}\n\nExpected Result:\n{}\n\nPriority:\n{}\n",
        test_case.description,
        test_case.preconditions,
        steps,
        test_case.expected_result,
        test_case.priority,
    )
}

/// `POST /rest/api/3/issue` body for one test case.
pub fn build_issue_payload(config: &TrackerConfig, project_key: &str, test_case: &TestCase) -> Value {
    json!({
        "fields": {
            "project": { "key": project_key },
            "summary": test_case.display_title(),
            "description": to_adf(&describe_test_case(test_case)),
            "issuetype": { "name": config.issue_type },
            "labels": config.labels,
        }
    })
}

/// Outcome of pushing one test case.
#[derive(Debug)]
pub struct PushOutcome<'a> {
    pub test_case: &'a TestCase,
    pub result: Result<CreatedIssue, TrackerError>,
}

/// Create a ticket for every test case, continuing past individual failures.
pub fn push_test_cases<'a, T: IssueTracker + ?Sized>(
    tracker: &T,
    test_cases: &'a [TestCase],
) -> Vec<PushOutcome<'a>> {
    test_cases
        .iter()
        .map(|test_case| {
            let result = tracker.create_issue(test_case);
            match &result {
                Ok(issue) => tracing::info!(key = %issue.key, title = %test_case.display_title(), "ticket created"),
                Err(e) => tracing::warn!(title = %test_case.display_title(), error = %e, "ticket not created"),
            }
            PushOutcome { test_case, result }
        })
        .collect()
}
