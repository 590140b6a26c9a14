use anyhow::Result;
use clap::Parser;
use qa_roi::cli::{Cli, Commands};
use qa_roi::commands::{self, AnalyzeConfig, RoiConfig, WhatIfConfig};
use qa_roi::formatting::FormattingConfig;
use qa_roi::observability;

fn main() -> Result<()> {
    observability::install_panic_hook();
    let cli = Cli::parse();
    observability::init_tracing(cli.verbosity);

    let formatting = if cli.plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env()
    };

    match cli.command {
        Commands::Analyze {
            stories,
            multiplier,
            format,
            output,
            push_tickets,
            config,
        } => commands::handle_analyze(AnalyzeConfig {
            stories,
            multiplier,
            format,
            output,
            push_tickets,
            config,
            formatting,
            quiet: cli.plain,
        }),
        Commands::Roi {
            estimations,
            multiplier,
            format,
            output,
            config,
        } => commands::handle_roi(RoiConfig {
            estimations,
            multiplier,
            format,
            output,
            config,
            formatting,
        }),
        Commands::WhatIf {
            report,
            multiplier,
            format,
            output,
        } => commands::handle_what_if(WhatIfConfig {
            report,
            multiplier,
            format,
            output,
            formatting,
        }),
        Commands::Push { report, config } => commands::handle_push(&report, config.as_deref()),
        Commands::Init { force } => commands::init_config(force),
    }
}
