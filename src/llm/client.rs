use std::time::Duration;

use serde_json::{json, Value};

use super::{CompletionBackend, Prompt};
use crate::config::{LlmConfig, LlmProvider};
use crate::errors::LlmError;

const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions client for Azure OpenAI or an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::blocking::Client,
    config: LlmConfig,
    api_key: String,
}

impl ChatClient {
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| LlmError::NotConfigured("OPENAI_ACCESS_TOKEN is not set".into()))?;

        if config.provider == LlmProvider::Azure {
            if config.endpoint.is_none() {
                return Err(LlmError::NotConfigured("AZURE_ENDPOINT is not set".into()));
            }
            if config.deployment.is_none() {
                return Err(LlmError::NotConfigured(
                    "AZURE_DEPLOYMENT_NAME is not set".into(),
                ));
            }
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            api_key,
        })
    }
}

impl CompletionBackend for ChatClient {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let (url, headers, body) = build_request(&self.config, &self.api_key, prompt);

        let mut req = self.http.post(&url).json(&body);
        for (k, v) in headers {
            req = req.header(k, v);
        }

        tracing::debug!(provider = ?self.config.provider, "sending completion request");
        let resp = req.send()?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = resp.json()?;
        extract_text(&json)
    }
}

fn build_request(
    cfg: &LlmConfig,
    api_key: &str,
    prompt: &Prompt,
) -> (String, Vec<(&'static str, String)>, Value) {
    let messages = json!([
        { "role": "system", "content": prompt.system },
        { "role": "user", "content": prompt.user }
    ]);

    match cfg.provider {
        LlmProvider::Azure => {
            let url = format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                cfg.endpoint.as_deref().unwrap_or_default().trim_end_matches('/'),
                cfg.deployment.as_deref().unwrap_or_default(),
                cfg.api_version
            );

            let body = json!({
                "messages": messages,
                "temperature": cfg.temperature,
            });

            (url, vec![("api-key", api_key.to_string())], body)
        }

        LlmProvider::OpenAi => {
            let url = format!(
                "{}/chat/completions",
                cfg.endpoint
                    .as_deref()
                    .unwrap_or(OPENAI_DEFAULT_BASE_URL)
                    .trim_end_matches('/')
            );

            let body = json!({
                "model": cfg.model,
                "messages": messages,
                "temperature": cfg.temperature,
            });

            (
                url,
                vec![("Authorization", format!("Bearer {api_key}"))],
                body,
            )
        }
    }
}

fn extract_text(v: &Value) -> Result<String, LlmError> {
    v.pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            LlmError::MalformedResponse("no choices[0].message.content in response".into())
        })
}
