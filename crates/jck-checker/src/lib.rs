//! Checking pass over bound class bodies.
//!
//! - `scope` - variables, frames and the definite-assignment bitset
//! - `oracle` - expression typing seam (`TypeOracle`)
//! - `state` - `CheckerState` and shared helpers
//! - `class_checker` / `constructor_checker` - per-class orchestration
//! - `statements` / `expressions` - flow through bodies
//! - `call_checker` - method and constructor resolution
//! - `override_checker` - override compatibility

mod call_checker;
mod class_checker;
pub mod context;
mod constructor_checker;
mod expressions;
pub mod oracle;
mod override_checker;
pub mod scope;
pub mod state;
mod statements;

#[cfg(test)]
pub(crate) mod test_support;

pub use context::CheckerOptions;
pub use jck_binder::LanguageLevel;
pub use oracle::{DeclaredTypeOracle, ExprType, ScopeView, TypeOracle};
pub use scope::{FrameKind, Scope, VarId, VarOrigin, Variable};
pub use state::{CheckerState, Completion};
