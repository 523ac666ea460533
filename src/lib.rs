//! jck: a staged semantic checker for Java-like class bodies.
//!
//! The facade re-exports the workspace crates and adds the `Program` driver,
//! tracing setup and the CLI used by the `jck` binary.

pub use jck_ast as ast;
pub use jck_binder as binder;
pub use jck_checker as checker;
pub use jck_common as common;

pub use jck_ast::{AstBuilder, CompilationUnit};
pub use jck_binder::{LanguageLevel, SymbolTable};
pub use jck_checker::{CheckerOptions, DeclaredTypeOracle, ExprType, ScopeView, TypeOracle};
pub use jck_common::{Diagnostic, DiagnosticCategory, Diagnostics, diagnostic_codes};

pub mod program;
pub use program::{CheckResult, Program};

pub mod tracing_config;

pub mod cli;
