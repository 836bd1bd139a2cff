//! Output formatting for the CLI.

use std::fmt::Display;

use console::style;
use serde::Serialize;

/// Output handler for CLI messages.
///
/// Human-readable messages are suppressed in JSON mode so stdout carries
/// exactly one JSON document.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn human(&self) -> bool {
        !self.json
    }

    pub fn info(&self, msg: impl Display) {
        if self.human() {
            println!("{} {msg}", style("ℹ").blue());
        }
    }

    pub fn success(&self, msg: impl Display) {
        if self.human() {
            println!("{} {msg}", style("✓").green());
        }
    }

    /// Report a failure on stderr, as `{"error": ...}` in JSON mode.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Verbose-only detail on stderr.
    pub fn debug(&self, msg: impl Display) {
        if self.verbose && self.human() {
            eprintln!("{}", style(format!("→ {msg}")).dim());
        }
    }

    pub fn header(&self, title: impl Display) {
        if self.human() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Pretty-print `value` as the command's JSON result.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{json}");
        }
    }

    pub fn kv(&self, key: &str, value: impl Display) {
        if self.human() {
            println!("  {}: {value}", style(key).dim());
        }
    }

    pub fn list_item(&self, item: impl Display) {
        if self.human() {
            println!("  {} {item}", style("•").dim());
        }
    }

    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.human() {
            println!("  {}", format_row(cols, widths));
        }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    let formatted: Vec<String> = cols
        .iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", col, width = width))
        .collect();
    formatted.join("  ").trim_end().to_string()
}

/// Sizes as a comma separated list, or a note for unsized products.
pub fn format_sizes(sizes: &[String]) -> String {
    if sizes.is_empty() {
        style("one size").dim().to_string()
    } else {
        sizes.join(", ")
    }
}

/// Truncate `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
