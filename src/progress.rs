//! Progress feedback for batch analysis.
//!
//! Bars draw on stderr and are hidden in quiet mode (`--plain` or
//! `QAROI_QUIET`) and whenever stderr is not a terminal, so piped and CI
//! runs stay clean.

use indicatif::{ProgressBar, ProgressStyle};

pub const TEMPLATE_STORIES: &str = "📝 {msg} [{bar:30}] {pos}/{len} stories ({percent}%) - {eta}";
pub const QUIET_ENV_VAR: &str = "QAROI_QUIET";

#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool) -> Self {
        Self {
            quiet_mode: quiet || std::env::var(QUIET_ENV_VAR).is_ok(),
        }
    }

    pub fn should_show_progress(&self) -> bool {
        if self.quiet_mode {
            return false;
        }

        use std::io::IsTerminal;
        std::io::stderr().is_terminal()
    }

    /// Bar counting analysed stories; hidden when progress is off.
    pub fn story_bar(&self, len: u64) -> ProgressBar {
        if !self.should_show_progress() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len);
        match ProgressStyle::default_bar().template(TEMPLATE_STORIES) {
            Ok(style) => pb.set_style(style.progress_chars("█▓▒░  ")),
            Err(e) => tracing::debug!("Invalid progress template: {}", e),
        }
        pb.set_message("Analysing");
        pb
    }
}
