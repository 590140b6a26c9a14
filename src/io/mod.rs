//! Report output: the [`Report`] model and its JSON, Markdown and terminal writers.

pub mod report;
pub mod writers;

pub use report::Report;
pub use writers::{JsonWriter, MarkdownWriter, TerminalWriter};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::formatting::FormattingConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Markdown,
    Json,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &Report) -> Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

/// Render `report` to `output`, or to stdout when no path is given.
///
/// Files never get colour codes.
pub fn emit_report(
    report: &Report,
    format: OutputFormat,
    output: Option<&Path>,
    formatting: FormattingConfig,
) -> Result<()> {
    match output {
        Some(path) => {
            let mut buffer = Vec::new();
            create_writer(format, &mut buffer, FormattingConfig::plain()).write_report(report)?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, buffer)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            tracing::info!("Report written to {}", path.display());
            Ok(())
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            create_writer(format, &mut handle, formatting).write_report(report)?;
            handle.flush()?;
            Ok(())
        }
    }
}
