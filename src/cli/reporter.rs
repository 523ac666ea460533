use anyhow::{Context, Result};
use colored::Colorize;

use jck_common::{Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation};

pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One diagnostic per line, each terminated by a newline.
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    pub fn render_json(&self, diagnostics: &[Diagnostic]) -> Result<String> {
        serde_json::to_string_pretty(diagnostics).context("failed to serialize diagnostics")
    }

    /// `file#anchor - error JCK2003: message`
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = self.format_location(&diagnostic.file, diagnostic);
        output.push_str(" - ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&self.format_code(diagnostic.code));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);

        for related in &diagnostic.related_information {
            output.push('\n');
            output.push_str(&self.format_related(related));
        }
        output
    }

    /// `Found 3 errors in 2 files.`
    pub fn summary(&self, diagnostics: &[Diagnostic]) -> String {
        let count = diagnostics.len();
        let mut files: Vec<&str> = diagnostics.iter().map(|d| d.file.as_str()).collect();
        files.sort_unstable();
        files.dedup();
        let noun = if count == 1 { "error" } else { "errors" };
        match files.len() {
            0 | 1 => format!("Found {count} {noun}."),
            n => format!("Found {count} {noun} in {n} files."),
        }
    }

    fn format_location(&self, file: &str, diagnostic: &Diagnostic) -> String {
        let file = if file.is_empty() { "<unknown>" } else { file };
        let location = format!("{file}{}", diagnostic.anchor);
        if self.color {
            location.cyan().to_string()
        } else {
            location
        }
    }

    fn format_related(&self, related: &DiagnosticRelatedInformation) -> String {
        let prefix = if self.color {
            "  Related".dimmed().to_string()
        } else {
            "  Related".to_string()
        };
        format!(
            "{prefix}: {}{} - {}",
            related.file, related.anchor, related.message_text
        )
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Internal => "internal error",
            DiagnosticCategory::Message => "message",
        };

        if !self.color {
            return label.to_string();
        }

        match category {
            DiagnosticCategory::Error | DiagnosticCategory::Internal => {
                label.red().bold().to_string()
            }
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            DiagnosticCategory::Message => label.cyan().bold().to_string(),
        }
    }

    fn format_code(&self, code: u32) -> String {
        let label = format!("JCK{code}");
        if self.color {
            label.bright_blue().to_string()
        } else {
            label
        }
    }
}
