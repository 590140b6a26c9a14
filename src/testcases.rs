//! Generated test cases.
//!
//! The model answers with a JSON array of objects keyed the way QA teams
//! write test cases ("Title", "Expected Result", ...). Keys we do not model
//! are kept in `extra` so nothing the model produced is lost on export.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::errors::RoiError;
use crate::estimation::clean_llm_json;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Preconditions", default)]
    pub preconditions: String,

    #[serde(rename = "Steps", default, deserialize_with = "steps_from_list_or_text")]
    pub steps: Vec<String>,

    #[serde(rename = "Expected Result", default)]
    pub expected_result: String,

    #[serde(rename = "Priority", default)]
    pub priority: String,

    #[serde(rename = "User Story", default, skip_serializing_if = "String::is_empty")]
    pub user_story: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestCase {
    /// Title, falling back to the first step when the model left it blank.
    pub fn display_title(&self) -> &str {
        if !self.title.trim().is_empty() {
            &self.title
        } else {
            self.steps
                .first()
                .map(String::as_str)
                .unwrap_or("Untitled test case")
        }
    }
}

/// Accept `"Steps": ["a", "b"]` as well as `"Steps": "a\nb"`.
fn steps_from_list_or_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Steps {
        List(Vec<Value>),
        Text(String),
        Missing(()),
    }

    Ok(match Steps::deserialize(deserializer)? {
        Steps::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Steps::Text(text) => text
            .lines()
            .map(|line| line.trim().trim_start_matches('-').trim().to_string())
            .filter(|line| !line.is_empty())
            .collect(),
        Steps::Missing(()) => Vec::new(),
    })
}

/// Parse a model response into test cases tagged with `user_story`.
pub fn parse_test_cases(raw: &str, user_story: &str) -> Result<Vec<TestCase>, RoiError> {
    let value = clean_llm_json(raw)?;
    let Value::Array(items) = value else {
        return Err(RoiError::invalid(
            "test_cases",
            "expected a JSON array of test cases",
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let mut case: TestCase = serde_json::from_value(item).map_err(|e| {
                RoiError::invalid(format!("test_cases[{index}]"), e.to_string())
            })?;
            case.user_story = user_story.to_string();
            Ok(case)
        })
        .collect()
}
