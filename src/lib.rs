// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod estimation;
pub mod formatting;
pub mod io;
pub mod llm;
pub mod observability;
pub mod pipeline;
pub mod progress;
pub mod roi;
pub mod summary;
pub mod testcases;
pub mod tracker;

// Re-export commonly used types
pub use crate::errors::{AnalysisError, ConfigError, LlmError, RoiError, TrackerError};

pub use crate::roi::{
    apply_what_if, compute_confidence, compute_decision, compute_roi, compute_suitability,
    DecisionPolicy, EnrichedRecord, EstimationRecord, RoiCalculator, RoiResult, RoiWarning,
    WhatIfScenario,
};

pub use crate::estimation::{clean_llm_json, parse_estimations, EstimationResponse};

pub use crate::pipeline::{split_stories, AnalysisContext, StoryAnalysis, StoryAnalyzer, StoryFailure};

pub use crate::summary::{decision_matrix, DecisionRow, PortfolioSummary};

pub use crate::testcases::{parse_test_cases, TestCase};

pub use crate::io::{create_writer, emit_report, OutputFormat, OutputWriter, Report};

pub use crate::config::{load_config, AppConfig};
