mod settings;
pub mod env;
mod loader;

pub use settings::{
    AppConfig, LlmConfig, LlmProvider, OutputConfig, Standards, StandardsConfig, TrackerConfig,
    WhatIfConfig,
};
pub use env::apply_env_overrides;
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Starter `.qaroi.toml` written by `qa-roi init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# qa-roi configuration

[policy]
# Automation is recommended when ROI is above this percentage...
min_roi_percentage = 0.0
# ...and suitability reaches this score (0-100)
min_suitability_score = 60

[what_if]
multiplier = 1.0
slider_min = 0.5
slider_max = 2.0

[llm]
# "azure" or "openai"; credentials come from OPENAI_ACCESS_TOKEN
provider = "azure"
api_version = "2024-06-01"
temperature = 0.2
timeout_secs = 60

[standards]
qa_estimation = "data/qa_estimation_standards.txt"
testing = "data/testing_standard.txt"

[tracker]
# JIRA_URL, JIRA_EMAIL, JIRA_API_TOKEN and JIRA_PROJECT_KEY are read from the environment
issue_type = "Task"
labels = ["AI_Generated", "QA_Automation"]

[output]
default_format = "terminal"
"#;
