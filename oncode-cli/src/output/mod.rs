//! Output formatting module for the OnCode CLI
//!
//! Every command result can be rendered as a human-readable table view or as
//! JSON for scripts. Colors and table wrapping follow the TTY context.

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;
use std::time::Duration;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format (default)
    #[default]
    Table,
    /// JSON format for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Disable wrapping of wide tables
    pub no_truncate: bool,
    /// Override terminal width (None = auto-detect)
    pub width: Option<usize>,
    /// Compact mode (minified JSON, borderless tables)
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_truncate: false,
            width: None,
            compact: false,
        }
    }

    /// Create an OutputConfig with automatic TTY detection
    ///
    /// When output is piped or redirected, wrapping is disabled.
    pub fn auto_detect(format: OutputFormat) -> Self {
        Self {
            no_truncate: !is_tty(),
            ..Self::new(format)
        }
    }

    /// Get the effective terminal width
    pub fn effective_width(&self) -> usize {
        self.width.unwrap_or_else(terminal_width)
    }

    pub fn should_truncate(&self) -> bool {
        !self.no_truncate
    }

    /// Builder: wrap tables at `width`, even when piped
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self.no_truncate = false;
        self
    }

    /// Builder: enable compact mode
    pub fn compact(mut self) -> Self {
        self.compact = true;
        self
    }
}

#[cfg(test)]
impl OutputConfig {
    /// Builder: disable wrapping
    pub fn without_truncation(mut self) -> Self {
        self.no_truncate = true;
        self
    }
}

/// Types that can be rendered in every output format
pub trait Outputter: Serialize + Sized {
    fn to_table(&self, config: &OutputConfig) -> String;

    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
        }
    }

    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

/// Result wrapper for formatted output with automatic format selection
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    pub fn new(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        self.data.output(&self.config);
        Ok(())
    }
}

/// Simple trait for results whose table view ignores the output config
pub trait TableDisplay: Serialize {
    fn to_table(&self) -> String;
}

impl<T: TableDisplay + Serialize> Outputter for T {
    fn to_table(&self, _config: &OutputConfig) -> String {
        TableDisplay::to_table(self)
    }
}

// ============================================================================
// Built-in message types
// ============================================================================

/// Simple success message
#[derive(Debug, Serialize)]
pub struct SuccessMessage {
    pub message: String,
}

impl SuccessMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl TableDisplay for SuccessMessage {
    fn to_table(&self) -> String {
        use colored::Colorize;
        format!("{} {}", "SUCCESS:".green().bold(), self.message)
    }
}

// ============================================================================
// Utility functions
// ============================================================================

/// Truncate a string to a maximum width with ellipsis
pub fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let truncated: String = s.chars().take(max_width - 3).collect();
        format!("{}...", truncated)
    }
}

/// Collapse runs of whitespace into single spaces, for one-line previews
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Detect if stdout is a TTY
pub fn is_tty() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to 80 if unavailable
pub fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Spinner shown on stderr while waiting for the backend.
///
/// Hidden automatically when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        .template("{spinner:.cyan} {msg}")
    {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
