use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::ConfigError;
use crate::io::OutputFormat;
use crate::roi::DecisionPolicy;

/// Root configuration structure, read from `.qaroi.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Thresholds for the automation recommendation
    #[serde(default)]
    pub policy: DecisionPolicy,

    /// Default what-if scenario
    #[serde(default)]
    pub what_if: WhatIfConfig,

    /// Completion backend settings
    #[serde(default)]
    pub llm: LlmConfig,

    /// Standards documents fed to the prompts
    #[serde(default)]
    pub standards: StandardsConfig,

    /// Issue tracker settings
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let what_if = &self.what_if;
        if !what_if.multiplier.is_finite() || what_if.multiplier <= 0.0 {
            return Err(invalid("what_if.multiplier", "must be a finite number above 0"));
        }
        if what_if.slider_min > what_if.slider_max {
            return Err(invalid(
                "what_if.slider_min",
                "must not be greater than what_if.slider_max",
            ));
        }
        if self.policy.min_suitability_score > 100 {
            return Err(invalid("policy.min_suitability_score", "must be within 0..=100"));
        }
        if !self.policy.min_roi_percentage.is_finite() {
            return Err(invalid("policy.min_roi_percentage", "must be finite"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(invalid("llm.temperature", "must be within 0.0..=2.0"));
        }
        if self.llm.timeout_secs == 0 {
            return Err(invalid("llm.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhatIfConfig {
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Range offered by interactive front ends. Values outside it are
    /// honoured with a warning.
    #[serde(default = "default_slider_min")]
    pub slider_min: f64,

    #[serde(default = "default_slider_max")]
    pub slider_max: f64,
}

impl Default for WhatIfConfig {
    fn default() -> Self {
        Self {
            multiplier: default_multiplier(),
            slider_min: default_slider_min(),
            slider_max: default_slider_max(),
        }
    }
}

impl WhatIfConfig {
    pub fn is_conventional(&self, multiplier: f64) -> bool {
        (self.slider_min..=self.slider_max).contains(&multiplier)
    }
}

fn default_multiplier() -> f64 {
    1.0
}
fn default_slider_min() -> f64 {
    0.5
}
fn default_slider_max() -> f64 {
    2.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Azure,
    #[serde(rename = "openai")]
    OpenAi,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: LlmProvider,

    /// Azure resource endpoint, or base URL of an OpenAI-compatible API
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Azure deployment name
    #[serde(default)]
    pub deployment: Option<String>,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Model name sent to OpenAI-compatible APIs
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Only ever taken from the environment
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            endpoint: None,
            deployment: None,
            api_version: default_api_version(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

fn default_api_version() -> String {
    "2024-06-01".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_temperature() -> f64 {
    0.2
}
fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardsConfig {
    #[serde(default = "default_qa_estimation_path")]
    pub qa_estimation: PathBuf,

    #[serde(default = "default_testing_path")]
    pub testing: PathBuf,
}

impl Default for StandardsConfig {
    fn default() -> Self {
        Self {
            qa_estimation: default_qa_estimation_path(),
            testing: default_testing_path(),
        }
    }
}

fn default_qa_estimation_path() -> PathBuf {
    PathBuf::from("data/qa_estimation_standards.txt")
}
fn default_testing_path() -> PathBuf {
    PathBuf::from("data/testing_standard.txt")
}

/// Contents of the two standards documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standards {
    pub qa_estimation: String,
    pub testing: String,
}

impl StandardsConfig {
    /// Read both documents; relative paths resolve against `base`.
    pub fn load(&self, base: &Path) -> Result<Standards, ConfigError> {
        Ok(Standards {
            qa_estimation: read_standards(&base.join(&self.qa_estimation))?,
            testing: read_standards(&base.join(&self.testing))?,
        })
    }
}

fn read_standards(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::MissingStandards(path.to_path_buf())
        } else {
            ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Jira site URL, e.g. `https://example.atlassian.net`
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub project_key: Option<String>,

    #[serde(default = "default_issue_type")]
    pub issue_type: String,

    #[serde(default = "default_labels")]
    pub labels: Vec<String>,

    #[serde(skip)]
    pub email: Option<String>,

    #[serde(skip)]
    pub api_token: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            url: None,
            project_key: None,
            issue_type: default_issue_type(),
            labels: default_labels(),
            email: None,
            api_token: None,
        }
    }
}

fn default_issue_type() -> String {
    "Task".to_string()
}
fn default_labels() -> Vec<String> {
    vec!["AI_Generated".to_string(), "QA_Automation".to_string()]
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: OutputFormat,
}
