//! Checking pass state.
//!
//! `CheckerState` walks every class body of a unit after the structural
//! pass has bound all units. Its methods are split across modules:
//!
//! - `class_checker` - per-class orchestration (initializers, members, nested types)
//! - `constructor_checker` - delegation order and final-field completeness
//! - `statements` - statements and flow merging
//! - `expressions` - reads, assignments and name resolution
//! - `call_checker` - method and constructor resolution
//! - `override_checker` - override compatibility

use fixedbitset::FixedBitSet;
use jck_ast::{CompilationUnit, Expr, TypeRef};
use jck_binder::{ClassId, MethodId, ResolvedType, SymbolTable, TypeContext};
use jck_common::diagnostics::diagnostic_codes;
use jck_common::limits::MAX_AST_DEPTH;
use jck_common::{Diagnostics, NodeId};
use rustc_hash::FxHashMap;

use crate::context::CheckerOptions;
use crate::oracle::{ExprType, ScopeView, TypeOracle};
use crate::scope::{Scope, VarId};

/// How a statement (or statement list) completes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Normal,
    /// `return`, `throw`, `break`, `continue`, or every path does one of these.
    Abrupt,
}

impl Completion {
    #[must_use]
    pub fn is_normal(self) -> bool {
        self == Completion::Normal
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum BodyKind {
    #[default]
    Initializer,
    Constructor(MethodId),
    Method(MethodId),
}

/// Per-body state: what is being checked and where its paths exit.
#[derive(Clone, Debug, Default)]
pub(crate) struct BodyContext {
    pub kind: BodyKind,
    pub is_static: bool,
    /// Declared return type of a method body.
    pub return_type: Option<String>,
    /// Intersection of the assignment states at every `return`.
    pub exits: Option<FixedBitSet>,
    /// `break`/`continue` statements seen in the innermost loop body.
    pub jumps: u32,
    /// `break` statements seen in the innermost loop body.
    pub breaks: u32,
    /// Own fields of the class (field index, scope variable).
    pub field_vars: Vec<(usize, VarId)>,
}

pub struct CheckerState<'t, 'a> {
    pub table: &'t mut SymbolTable<'a>,
    pub diagnostics: &'t mut Diagnostics,
    pub options: &'t CheckerOptions,
    pub(crate) oracle: &'t dyn TypeOracle,
    pub(crate) unit: Option<&'a CompilationUnit>,
    pub(crate) class: Option<ClassId>,
    pub(crate) scope: Scope,
    pub(crate) body: BodyContext,
    depth: u32,
    depth_reported: bool,
    /// Own final fields (by field index) each constructor is guaranteed to assign.
    pub(crate) guarantees: FxHashMap<MethodId, FixedBitSet>,
}

impl<'t, 'a> CheckerState<'t, 'a> {
    pub fn new(
        table: &'t mut SymbolTable<'a>,
        diagnostics: &'t mut Diagnostics,
        options: &'t CheckerOptions,
        oracle: &'t dyn TypeOracle,
    ) -> Self {
        Self {
            table,
            diagnostics,
            options,
            oracle,
            unit: None,
            class: None,
            scope: Scope::new(),
            body: BodyContext::default(),
            depth: 0,
            depth_reported: false,
            guarantees: FxHashMap::default(),
        }
    }

    /// Check every class body of a unit. Its types must already be bound.
    pub fn check_unit(&mut self, unit: &'a CompilationUnit) {
        tracing::debug!(file = %unit.file, "checking unit");
        self.unit = Some(unit);
        self.diagnostics.set_file(unit.file.as_str());
        self.depth = 0;
        self.depth_reported = false;
        for decl in &unit.types {
            self.check_class(decl, &[]);
        }
        self.unit = None;
    }

    // =========================================================================
    // Shared helpers
    // =========================================================================

    pub(crate) fn report(&mut self, anchor: NodeId, code: u32, args: &[&str]) {
        self.diagnostics.report(anchor, code, args);
    }

    pub(crate) fn type_context(&self) -> TypeContext<'a> {
        match self.unit {
            Some(unit) => TypeContext::for_unit(unit, self.class),
            None => TypeContext {
                file: "",
                package: "",
                imports: &[],
                class: self.class,
            },
        }
    }

    /// Resolve a type written in a body, reporting failures.
    pub(crate) fn resolve_type(&mut self, ty: &TypeRef) -> String {
        let ctx = self.type_context();
        let resolved = self.table.resolve_type_ref(&ctx, ty, self.diagnostics);
        self.table.type_text(&resolved, ty)
    }

    pub(crate) fn resolve_class(&mut self, ty: &TypeRef) -> Option<ClassId> {
        let ctx = self.type_context();
        match self.table.resolve_type_ref(&ctx, ty, self.diagnostics) {
            ResolvedType::Class(id) => Some(id),
            ResolvedType::Primitive(_) | ResolvedType::Unknown => None,
        }
    }

    pub(crate) fn type_of(&self, expr: &Expr) -> ExprType {
        let view = ScopeView {
            scope: &self.scope,
            table: &*self.table,
            class: self.class,
            ctx: self.type_context(),
        };
        self.oracle.type_of(expr, &view)
    }

    /// Guard recursion depth. Returns `false` once the limit is exceeded;
    /// the caller must still call `leave_nested`.
    pub(crate) fn enter_nested(&mut self, anchor: NodeId) -> bool {
        self.depth += 1;
        if self.depth <= MAX_AST_DEPTH {
            return true;
        }
        if !self.depth_reported {
            self.depth_reported = true;
            let limit = MAX_AST_DEPTH.to_string();
            self.report(anchor, diagnostic_codes::NESTING_TOO_DEEP, &[&limit]);
        }
        false
    }

    pub(crate) fn leave_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Add the current state to the exit states of the body (at a `return`).
    pub(crate) fn record_exit(&mut self) {
        let state = self.scope.state();
        self.merge_exit(state);
    }

    pub(crate) fn merge_exit(&mut self, state: FixedBitSet) {
        self.body.exits = match self.body.exits.take() {
            Some(exits) => Scope::intersect([&exits, &state]),
            None => Some(state),
        };
    }

    /// Undo every assignment made since `before`.
    pub(crate) fn undo_since(&mut self, before: &FixedBitSet) {
        let assigned = self.scope.assigned_since(before);
        self.scope.unassign(&assigned);
    }
}

#[cfg(test)]
#[path = "../tests/checker_tests.rs"]
mod tests;
