//! Common types and utilities for the jck class-body checker.
//!
//! This crate provides foundational types used across all jck crates:
//! - AST node identities (`NodeId`) used as diagnostic anchors
//! - Diagnostics (`Diagnostic`, `Diagnostics`, codes and message templates)
//! - Checker limits and thresholds

// Node identities shared by the AST and the diagnostics model
pub mod node_id;
pub use node_id::NodeId;

// Diagnostic model and the append-only collector
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticRelatedInformation, Diagnostics, diagnostic_codes,
    diagnostic_messages, format_message,
};

// Centralized limits and thresholds
pub mod limits;
