use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_terminal_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,
    Always,
    Never,
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_terminal_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode, emoji: EmojiMode) -> Self {
        Self { color, emoji }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// ASCII-only, no colors, no emoji
    pub fn plain() -> Self {
        Self::new(ColorMode::Never, EmojiMode::Never)
    }
}

/// Colours and markers for report values.
///
/// Savings and positive ROI render green, losses red; the decision marker
/// falls back to ASCII when emoji are off.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    config: FormattingConfig,
}

impl Palette {
    pub fn new(config: FormattingConfig) -> Self {
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    pub fn uses_color(&self) -> bool {
        self.config.color.should_use_color()
    }

    pub fn header(&self, text: &str) -> String {
        if self.uses_color() {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn dim(&self, text: &str) -> String {
        if self.uses_color() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.uses_color() {
            text.yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Signed amount, green when it favours automation.
    pub fn signed(&self, value: f64, text: &str) -> String {
        if !self.uses_color() {
            return text.to_string();
        }
        if value > 0.0 {
            text.green().to_string()
        } else if value < 0.0 {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn decision(&self, recommended: bool) -> String {
        let use_emoji = self.config.emoji.should_use_emoji();
        match (recommended, use_emoji) {
            (true, true) => "✅ Automate".to_string(),
            (true, false) => "[YES] Automate".to_string(),
            (false, true) => "✋ Keep manual".to_string(),
            (false, false) => "[NO] Keep manual".to_string(),
        }
    }
}

/// US-dollar amount with thousands separators, e.g. `$18,000.00` or `-$5.50`.
pub fn money(value: f64) -> String {
    let cents = (value.abs() * 100.0).round() as u128;
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac:02}")
}

pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

fn detect_terminal_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }
    std::io::stdout().is_terminal()
}
