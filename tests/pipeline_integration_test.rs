mod common;

use indicatif::ProgressBar;
use qa_roi::config::Standards;
use qa_roi::io::{create_writer, OutputFormat, Report};
use qa_roi::llm::{CompletionBackend, Prompt};
use qa_roi::formatting::FormattingConfig;
use qa_roi::{split_stories, AnalysisContext, DecisionPolicy, LlmError, StoryAnalyzer};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Scripted backend: estimation prompts get the login estimation, test-case
/// prompts get two cases, and every call is counted.
struct ScriptedBackend {
    calls: AtomicUsize,
}

impl CompletionBackend for ScriptedBackend {
    fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if prompt.user.contains("STRICT JSON ARRAY") {
            Ok(r#"[{"Title": "Happy path", "Steps": ["a"]}, {"Title": "Sad path", "Steps": "b\nc"}]"#.into())
        } else if prompt.user.contains("malformed") {
            Ok("I think about 40 test cases".into())
        } else {
            Ok(format!("```json\n{}\n```", common::login_estimation_json()))
        }
    }
}

#[test]
fn batch_report_round_trips_through_json() {
    let backend = ScriptedBackend {
        calls: AtomicUsize::new(0),
    };
    let analyzer = StoryAnalyzer::new(&backend, Standards::default());
    let stories = split_stories("Login story\nmalformed story\nExport story\n");
    let mut ctx = AnalysisContext::new(DecisionPolicy::default(), 1.5);

    analyzer.analyze_batch(&stories, &mut ctx, &ProgressBar::hidden());

    // two calls per good story, one for the malformed estimation
    assert_eq!(backend.calls.load(Ordering::SeqCst), 5);
    assert_eq!(ctx.analyses().len(), 2);
    assert_eq!(ctx.failures().len(), 1);
    assert_eq!(ctx.failures()[0].user_story, "malformed story");

    let report = Report::from_context(&ctx);
    assert_eq!(report.test_cases.len(), 4);
    assert_eq!(report.summary.recommended_count, 2);

    let mut buffer = Vec::new();
    create_writer(OutputFormat::Json, &mut buffer, FormattingConfig::plain())
        .write_report(&report)
        .unwrap();
    let reloaded: Report = serde_json::from_slice(&buffer).unwrap();

    assert_eq!(reloaded, report);
    assert_eq!(reloaded.records[0].what_if.multiplier, 1.5);
    assert_eq!(reloaded.test_cases[1].steps, vec!["b", "c"]);
}
