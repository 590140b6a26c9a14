//! Crash report printed instead of the default panic message.
//!
//! Shows the panic location and the innermost tracing span, which during
//! batch analysis names the story being processed.

use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 76;

pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let rule = "═".repeat(WIDTH + 2);

    eprintln!();
    eprintln!("╔{rule}╗");
    eprintln!("║ {:<WIDTH$} ║", "QA-ROI CRASH REPORT");
    eprintln!("╠{rule}╣");
    for line in report_lines(info) {
        eprintln!("║ {:<WIDTH$} ║", truncate(&line, WIDTH));
    }
    eprintln!("╚{rule}╝");

    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("Run with RUST_BACKTRACE=1 for a stack trace.");
    }
}

fn report_lines(info: &PanicHookInfo<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("Version: {VERSION}"),
        format!("Platform: {}", std::env::consts::OS),
        format!("Time: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")),
        format!("Panic: {}", extract_panic_message(info)),
    ];

    if let Some(location) = info.location() {
        lines.push(format!(
            "Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(metadata) = Span::current().metadata() {
        lines.push(format!("Span: {}", metadata.name()));
    }
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
