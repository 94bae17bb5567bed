//! Output formatting for the CLI
//!
//! Text output is colored unless disabled; in JSON mode only
//! machine-readable documents are written to stdout.

use crate::error::Result;
use colored::Colorize;
use serde::Serialize;

/// Formatter shared by all command handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    json: bool,
    no_color: bool,
}

impl OutputFormatter {
    /// Create a new formatter
    pub fn new(json: bool, no_color: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { json, no_color }
    }

    pub const fn is_json(&self) -> bool {
        self.json
    }

    pub const fn is_colored(&self) -> bool {
        !self.no_color
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if !self.json {
            println!("{} {}", "✓".green().bold(), message);
        }
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "Error:".red().bold(), message);
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if !self.json {
            println!("{message}");
        }
    }

    /// Print a warning to stderr
    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow().bold(), message);
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if !self.json {
            println!("\n{}", title.bold().underline());
        }
    }

    /// Print a value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

/// Format an amount with its currency label
pub fn format_amount(currency: &str, amount: f64) -> String {
    let whole = amount.trunc() as i64;
    let cents = ((amount - amount.trunc()).abs() * 100.0).round() as i64;
    let (whole, cents) = if cents == 100 {
        (whole + whole.signum().max(1), 0)
    } else {
        (whole, cents)
    };

    let digits = whole.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{currency} {sign}{grouped}.{cents:02}")
}
