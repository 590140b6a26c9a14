use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::{resolve_config, resolve_format, resolve_multiplier};
use crate::formatting::FormattingConfig;
use crate::io::{emit_report, OutputFormat, Report};
use crate::llm::ChatClient;
use crate::pipeline::{split_stories, AnalysisContext, StoryAnalyzer};
use crate::progress::ProgressConfig;
use crate::tracker::{push_test_cases, JiraClient};

#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    pub stories: PathBuf,
    pub multiplier: Option<f64>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub push_tickets: bool,
    pub config: Option<PathBuf>,
    pub formatting: FormattingConfig,
    pub quiet: bool,
}

pub fn handle_analyze(args: AnalyzeConfig) -> Result<()> {
    let (base, config) = resolve_config(args.config.as_deref())?;
    let multiplier = resolve_multiplier(args.multiplier, &config);
    ensure_positive_multiplier(multiplier)?;

    let stories = split_stories(&read_stories(&args.stories)?);
    if stories.is_empty() {
        anyhow::bail!("No user stories found in {}", args.stories.display());
    }

    let standards = config
        .standards
        .load(&base)
        .context("Failed to load standards documents")?;
    let client = ChatClient::from_config(&config.llm).context("Completion backend unavailable")?;
    let analyzer = StoryAnalyzer::new(client, standards);

    let mut ctx = AnalysisContext::new(config.policy, multiplier);
    let progress = ProgressConfig::from_env(args.quiet).story_bar(stories.len() as u64);
    tracing::info!("Analysing {} user stories", stories.len());
    analyzer.analyze_batch(&stories, &mut ctx, &progress);
    progress.finish_and_clear();

    if ctx.analyses().is_empty() {
        anyhow::bail!(
            "All {} user stories failed; first error: {}",
            ctx.failures().len(),
            ctx.failures()
                .first()
                .map(|f| f.error.as_str())
                .unwrap_or("unknown")
        );
    }

    let report = Report::from_context(&ctx);
    emit_report(
        &report,
        resolve_format(args.format, &config),
        args.output.as_deref(),
        args.formatting,
    )?;

    if args.push_tickets {
        let tracker = JiraClient::from_config(&config.tracker).context("Issue tracker unavailable")?;
        let outcomes = push_test_cases(&tracker, &report.test_cases);
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        eprintln!(
            "Created {} of {} tickets",
            outcomes.len() - failed,
            outcomes.len()
        );
    }

    Ok(())
}

pub(crate) fn ensure_positive_multiplier(multiplier: f64) -> Result<()> {
    if !multiplier.is_finite() || multiplier <= 0.0 {
        anyhow::bail!("What-if multiplier must be a finite number above 0, got {multiplier}");
    }
    Ok(())
}

fn read_stories(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read user stories from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read user stories from {}", path.display()))
}
