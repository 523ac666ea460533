//! Diagnostic types and message lookup for both checker passes.
//!
//! Message templates live in `data.rs`; placeholders are `{0}`, `{1}`, ...
//! and are filled in with `format_message`.

use crate::NodeId;
use serde::Serialize;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    /// A checker defect (pass desynchronization), never a user mistake.
    Internal = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g. the overridden declaration).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub anchor: NodeId,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A checker diagnostic: a message anchored at the most specific AST node available.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub anchor: NodeId,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information (e.g. where the conflicting member was declared)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, anchor: NodeId, message: String, code: u32) -> Self {
        Self {
            file,
            anchor,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Build a diagnostic from its registered template.
    ///
    /// Unknown codes fall back to the raw arguments so nothing is silently lost.
    #[must_use]
    pub fn from_code(file: String, anchor: NodeId, code: u32, args: &[&str]) -> Self {
        let (category, message_text) = match get_diagnostic_message(code) {
            Some(def) => (def.category, format_message(def.message, args)),
            None => (DiagnosticCategory::Error, args.join(" ")),
        };
        Self {
            file,
            anchor,
            message_text,
            category,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: String, anchor: NodeId, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            anchor,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.category == DiagnosticCategory::Internal
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

// =============================================================================
// Collector
// =============================================================================

/// Append-only diagnostics sink threaded through every pass.
///
/// Recording never halts a pass. Entries are never mutated or removed; the
/// optional `limit` only stops new entries from being stored once reached.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    file: String,
    items: Vec<Diagnostic>,
    limit: usize,
    dropped: usize,
}

impl Diagnostics {
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Cap the number of stored diagnostics (0 = unlimited).
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Switch the file name attached to subsequently recorded diagnostics.
    pub fn set_file(&mut self, file: impl Into<String>) {
        self.file = file.into();
    }

    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Record a diagnostic built from a registered code.
    pub fn report(&mut self, anchor: NodeId, code: u32, args: &[&str]) {
        let diag = Diagnostic::from_code(self.file.clone(), anchor, code, args);
        self.push(diag);
    }

    pub fn push(&mut self, diag: Diagnostic) {
        if self.limit != 0 && self.items.len() >= self.limit {
            self.dropped += 1;
            return;
        }
        self.items.push(diag);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        for diag in other.items {
            self.push(diag);
        }
        self.dropped += other.dropped;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of diagnostics discarded because the limit was reached.
    #[must_use]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn count_code(&self, code: u32) -> usize {
        self.items.iter().filter(|d| d.code == code).count()
    }

    #[must_use]
    pub fn has_internal_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_internal)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod tests;
