//! Environment overrides.
//!
//! Credentials never live in `.qaroi.toml`; they and the connection settings
//! below are read from the environment and win over the file.

use super::settings::AppConfig;

pub const AZURE_ENDPOINT: &str = "AZURE_ENDPOINT";
pub const OPENAI_ACCESS_TOKEN: &str = "OPENAI_ACCESS_TOKEN";
pub const API_VERSION: &str = "API_VERSION";
pub const AZURE_DEPLOYMENT_NAME: &str = "AZURE_DEPLOYMENT_NAME";
pub const JIRA_URL: &str = "JIRA_URL";
pub const JIRA_EMAIL: &str = "JIRA_EMAIL";
pub const JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";
pub const JIRA_PROJECT_KEY: &str = "JIRA_PROJECT_KEY";
pub const JIRA_ISSUE_TYPE: &str = "JIRA_ISSUE_TYPE";

/// Apply overrides from `lookup`, normally `std::env::var`.
///
/// Blank values are ignored.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(AZURE_ENDPOINT) {
        config.llm.endpoint = Some(v);
    }
    if let Some(v) = get(OPENAI_ACCESS_TOKEN) {
        config.llm.api_key = Some(v);
    }
    if let Some(v) = get(API_VERSION) {
        config.llm.api_version = v;
    }
    if let Some(v) = get(AZURE_DEPLOYMENT_NAME) {
        config.llm.deployment = Some(v);
    }

    if let Some(v) = get(JIRA_URL) {
        config.tracker.url = Some(v);
    }
    if let Some(v) = get(JIRA_EMAIL) {
        config.tracker.email = Some(v);
    }
    if let Some(v) = get(JIRA_API_TOKEN) {
        config.tracker.api_token = Some(v);
    }
    if let Some(v) = get(JIRA_PROJECT_KEY) {
        config.tracker.project_key = Some(v);
    }
    if let Some(v) = get(JIRA_ISSUE_TYPE) {
        config.tracker.issue_type = v;
    }
}
