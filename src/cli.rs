use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::io::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "qa-roi")]
#[command(about = "QA effort estimation, test case generation and automation ROI", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Plain output: no colour, no emoji
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate, generate test cases and compute ROI for user stories
    Analyze {
        /// File with one user story per line ("-" reads stdin)
        stories: PathBuf,

        /// What-if automation cost multiplier
        #[arg(short, long)]
        multiplier: Option<f64>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Create a tracker ticket for every generated test case
        #[arg(long)]
        push_tickets: bool,

        /// Configuration file (defaults to the nearest .qaroi.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Compute ROI offline from estimation JSON
    Roi {
        /// JSON file holding one estimation object or an array of them
        estimations: PathBuf,

        /// What-if automation cost multiplier
        #[arg(short, long)]
        multiplier: Option<f64>,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .qaroi.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Re-run the what-if scenario of a saved JSON report
    WhatIf {
        /// Report previously written with --format json
        report: PathBuf,

        /// New automation cost multiplier
        #[arg(short, long)]
        multiplier: f64,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create tracker tickets for the test cases of a saved JSON report
    Push {
        /// Report previously written with --format json
        report: PathBuf,

        /// Configuration file (defaults to the nearest .qaroi.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize a .qaroi.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_analyze_command() {
        let cli = Cli::parse_from([
            "qa-roi",
            "-vv",
            "analyze",
            "stories.txt",
            "--multiplier",
            "1.5",
            "--format",
            "json",
            "--push-tickets",
        ]);

        assert_eq!(cli.verbosity, 2);
        match cli.command {
            Commands::Analyze {
                stories,
                multiplier,
                format,
                push_tickets,
                output,
                ..
            } => {
                assert_eq!(stories, PathBuf::from("stories.txt"));
                assert_eq!(multiplier, Some(1.5));
                assert_eq!(format, Some(OutputFormat::Json));
                assert!(push_tickets);
                assert!(output.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_cli_parsing_what_if_requires_multiplier() {
        assert!(Cli::try_parse_from(["qa-roi", "what-if", "report.json"]).is_err());

        let cli = Cli::parse_from(["qa-roi", "what-if", "report.json", "-m", "0.8", "--plain"]);
        assert!(cli.plain);
        match cli.command {
            Commands::WhatIf { multiplier, .. } => assert_eq!(multiplier, 0.8),
            _ => panic!("Expected WhatIf command"),
        }
    }

    #[test]
    fn test_cli_parsing_init_command() {
        let cli = Cli::parse_from(["qa-roi", "init", "--force"]);
        match cli.command {
            Commands::Init { force } => assert!(force),
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
