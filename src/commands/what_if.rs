use anyhow::{Context, Result};
use std::path::PathBuf;

use super::analyze::ensure_positive_multiplier;
use super::{read_report, resolve_format, resolve_multiplier};
use crate::config;
use crate::formatting::FormattingConfig;
use crate::io::{emit_report, OutputFormat};

#[derive(Debug, Clone)]
pub struct WhatIfConfig {
    pub report: PathBuf,
    pub multiplier: f64,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub formatting: FormattingConfig,
}

/// Reload a JSON report and recompute only its what-if fields.
pub fn handle_what_if(args: WhatIfConfig) -> Result<()> {
    let (_, config) = config::load_config();
    let multiplier = resolve_multiplier(Some(args.multiplier), &config);
    ensure_positive_multiplier(multiplier)?;

    let mut report = read_report(&args.report)?;
    report
        .apply_multiplier(multiplier)
        .context("Failed to recompute what-if scenario")?;

    emit_report(
        &report,
        resolve_format(args.format, &config),
        args.output.as_deref(),
        args.formatting,
    )
}
