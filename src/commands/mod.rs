//! CLI command implementations.
//!
//! - **analyze**: estimate, generate test cases and compute ROI for stories
//! - **roi**: offline ROI from estimation JSON
//! - **what-if**: rerun the what-if scenario of a saved report
//! - **push**: create tracker tickets from a saved report
//! - **init**: write a starter `.qaroi.toml`

pub mod analyze;
pub mod init;
pub mod push;
pub mod roi;
pub mod what_if;

pub use analyze::{handle_analyze, AnalyzeConfig};
pub use init::init_config;
pub use push::handle_push;
pub use roi::{handle_roi, RoiConfig};
pub use what_if::{handle_what_if, WhatIfConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{self, AppConfig};
use crate::io::{OutputFormat, Report};

/// Explicit `--config` file, or the discovered one, with the directory
/// relative paths resolve against.
pub(crate) fn resolve_config(path: Option<&Path>) -> Result<(PathBuf, AppConfig)> {
    match path {
        Some(path) => {
            let config = config::load_config_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            let base = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            Ok((base, config))
        }
        None => Ok(config::load_config()),
    }
}

/// `--multiplier` if given, else the configured default; warns outside the slider range.
pub(crate) fn resolve_multiplier(requested: Option<f64>, config: &AppConfig) -> f64 {
    let multiplier = requested.unwrap_or(config.what_if.multiplier);
    if !config.what_if.is_conventional(multiplier) {
        tracing::warn!(
            "What-if multiplier {} is outside the usual {}-{} range",
            multiplier,
            config.what_if.slider_min,
            config.what_if.slider_max
        );
    }
    multiplier
}

pub(crate) fn resolve_format(requested: Option<OutputFormat>, config: &AppConfig) -> OutputFormat {
    requested.unwrap_or(config.output.default_format)
}

pub(crate) fn read_report(path: &Path) -> Result<Report> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read report {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a qa-roi JSON report", path.display()))
}
