// src/report/console.rs
// =============================================================================
// RunContext: the error and warning lists of a single run, plus printing.
//
// Every diagnostic goes through here so it is both printed (with a glyph per
// severity) and kept for the summary and the JSON report. The context is
// created by a command handler and passed by `&mut` into each stage; there
// is no global state.
//
// In `--json` mode the glyph lines are suppressed so stdout carries only the
// report.
// =============================================================================

use crate::facts::{CheckResult, Status};

#[derive(Debug, Default)]
pub struct RunContext {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    quiet: bool,
}

impl RunContext {
    pub fn new(quiet: bool) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            quiet,
        }
    }

    /// Print a line that is not a diagnostic (headers, counts)
    pub fn say(&self, message: impl AsRef<str>) {
        if !self.quiet {
            println!("{}", message.as_ref());
        }
    }

    pub fn section(&self, glyph: &str, title: &str) {
        self.say(format!("\n{glyph} {title}..."));
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.say(format!("✅ {}", message.as_ref()));
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.say(format!("⚠️  WARNING: {message}"));
        self.warnings.push(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.say(format!("❌ ERROR: {message}"));
        self.errors.push(message);
    }

    /// Log a check result at its own severity.
    pub fn record(&mut self, result: &CheckResult) {
        match result.status {
            Status::Ok => self.success(&result.detail),
            Status::Warning => self.warning(result.detail.clone()),
            Status::Error => self.error(result.detail.clone()),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    // Prints the banner-style summary shared by every command
    pub fn print_summary(&self, title: &str) {
        if self.quiet {
            return;
        }
        println!("\n{}", "=".repeat(60));
        println!("📊 {title}");
        println!("{}", "=".repeat(60));

        if !self.errors.is_empty() {
            println!("❌ {} errors found:", self.errors.len());
            for error in &self.errors {
                println!("   • {error}");
            }
        }

        if !self.warnings.is_empty() {
            println!("⚠️  {} warnings found:", self.warnings.len());
            for warning in &self.warnings {
                println!("   • {warning}");
            }
        }
    }
}
