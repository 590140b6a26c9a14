use std::time::Duration;

use serde_json::Value;

use super::{build_issue_payload, CreatedIssue, IssueTracker};
use crate::config::TrackerConfig;
use crate::errors::TrackerError;
use crate::testcases::TestCase;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Jira Cloud REST v3 client authenticated with an email and API token.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::blocking::Client,
    config: TrackerConfig,
    base_url: String,
    project_key: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    pub fn from_config(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let base_url = required(&config.url, "JIRA_URL")?;
        let project_key = required(&config.project_key, "JIRA_PROJECT_KEY")?;
        let email = required(&config.email, "JIRA_EMAIL")?;
        let api_token = required(&config.api_token, "JIRA_API_TOKEN")?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            project_key,
            email,
            api_token,
        })
    }

    pub fn issue_url(&self) -> String {
        issue_url(&self.base_url)
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, TrackerError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .ok_or(TrackerError::NotConfigured(name))
}

fn issue_url(base_url: &str) -> String {
    format!("{}/rest/api/3/issue", base_url.trim_end_matches('/'))
}

fn parse_created(body: &Value) -> CreatedIssue {
    let text = |key: &str| {
        body.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };
    CreatedIssue {
        key: text("key"),
        id: text("id"),
    }
}

impl IssueTracker for JiraClient {
    fn create_issue(&self, test_case: &TestCase) -> Result<CreatedIssue, TrackerError> {
        let payload = build_issue_payload(&self.config, &self.project_key, test_case);

        let resp = self
            .http
            .post(self.issue_url())
            .basic_auth(&self.email, Some(&self.api_token))
            .header("Accept", "application/json")
            .json(&payload)
            .send()?;
        let status = resp.status().as_u16();

        if !matches!(status, 200 | 201) {
            let body = resp.text().unwrap_or_default();
            return Err(TrackerError::Rejected { status, body });
        }

        let body: Value = resp.json()?;
        Ok(parse_created(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn configured() -> TrackerConfig {
        TrackerConfig {
            url: Some("https://example.atlassian.net/".into()),
            project_key: Some("QA".into()),
            email: Some("qa@example.com".into()),
            api_token: Some("token".into()),
            ..TrackerConfig::default()
        }
    }

    #[test]
    fn url_targets_issue_endpoint() {
        let client = JiraClient::from_config(&configured()).unwrap();
        assert_eq!(
            client.issue_url(),
            "https://example.atlassian.net/rest/api/3/issue"
        );
    }

    #[test]
    fn missing_settings_are_named() {
        let config = TrackerConfig {
            api_token: Some("  ".into()),
            ..configured()
        };
        assert!(matches!(
            JiraClient::from_config(&config),
            Err(TrackerError::NotConfigured("JIRA_API_TOKEN"))
        ));

        assert!(matches!(
            JiraClient::from_config(&TrackerConfig::default()),
            Err(TrackerError::NotConfigured("JIRA_URL"))
        ));
    }

    #[test]
    fn created_issue_is_read_from_response() {
        let issue = parse_created(&json!({ "id": "10001", "key": "QA-7", "self": "https://..." }));
        assert_eq!(
            issue,
            CreatedIssue {
                key: "QA-7".into(),
                id: "10001".into()
            }
        );
    }
}
