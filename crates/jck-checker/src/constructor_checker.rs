//! Constructor checking: delegation order and final-field completeness.
//!
//! Constructors of a class are checked callee-first along `this(...)`
//! delegation so a delegating constructor can rely on what its target is
//! known to assign. Between constructors the own final fields are reset to
//! the state left by the initializers.

use fixedbitset::FixedBitSet;
use jck_ast::{ConstructorCallKind, ConstructorCallStmt, ConstructorDecl, Stmt, TypeDecl};
use jck_binder::{ClassId, MethodId};
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;
use tracing::{debug, trace};

use crate::scope::{FrameKind, Scope, Variable};
use crate::state::{BodyKind, CheckerState};

/// Per-constructor state of the delegation walk.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

fn delegation_call(ctor: &ConstructorDecl) -> Option<&ConstructorCallStmt> {
    match ctor.body.stmts.first() {
        Some(Stmt::ConstructorCall(call)) if call.kind == ConstructorCallKind::This => Some(call),
        _ => None,
    }
}

/// Post-order walk over the delegation edges. Constructors reached again
/// while still active close a cycle and are flagged.
fn visit(
    index: usize,
    targets: &[Option<usize>],
    marks: &mut [Mark],
    recursive: &mut [bool],
    order: &mut Vec<usize>,
) {
    marks[index] = Mark::Active;
    if let Some(target) = targets[index] {
        match marks[target] {
            Mark::Unvisited => visit(target, targets, marks, recursive, order),
            Mark::Active => recursive[index] = true,
            Mark::Done => {}
        }
    }
    marks[index] = Mark::Done;
    order.push(index);
}

impl<'a> CheckerState<'_, 'a> {
    pub(crate) fn check_constructors(
        &mut self,
        decl: &'a TypeDecl,
        id: ClassId,
        members: &[Variable],
        init_state: &FixedBitSet,
    ) {
        let mut ctors: Vec<(&'a ConstructorDecl, MethodId)> = Vec::new();
        for ctor in decl.constructors() {
            if self.table.is_rejected(ctor.id) {
                continue;
            }
            if let Some(mid) = self.pair_declaration(id, ctor.id, &ctor.name, true, &ctor.params) {
                ctors.push((ctor, mid));
            }
        }
        if decl.constructors().next().is_none() {
            self.check_default_constructor(decl, id, init_state);
            return;
        }

        let (order, recursive) = self.delegation_order(id, &ctors, members);
        debug!(class = %decl.name, ?order, "constructor order");
        for index in order {
            let (ctor, mid) = ctors[index];
            self.check_constructor(id, ctor, mid, members, init_state, recursive[index]);
        }
    }

    fn check_default_constructor(&mut self, decl: &'a TypeDecl, id: ClassId, init_state: &FixedBitSet) {
        let Some(entry) = self.table.entry(id) else {
            return;
        };
        let class_name = entry.simple_name.clone();
        let unassigned: Vec<(String, NodeId)> = entry
            .fields
            .iter()
            .enumerate()
            .filter(|(index, f)| f.is_final() && !f.is_static() && !init_state.contains(*index))
            .map(|(_, f)| (f.name.clone(), f.decl))
            .collect();
        for (name, anchor) in unassigned {
            self.report(
                anchor,
                diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED_DEFAULT_CONSTRUCTOR,
                &[&name, &class_name],
            );
        }
        self.check_implicit_super(decl.id);
        if let Some(entry) = self.table.entry_mut(id) {
            entry.pending_constructor_count = entry.pending_constructor_count.saturating_sub(1);
        }
        self.commit_field_state(id, init_state);
    }

    /// Order constructors so each `this(...)` target is checked before its
    /// callers. Returns the order and, per constructor, whether its
    /// delegation closes a cycle.
    fn delegation_order(
        &mut self,
        id: ClassId,
        ctors: &[(&'a ConstructorDecl, MethodId)],
        members: &[Variable],
    ) -> (Vec<usize>, Vec<bool>) {
        let mut targets = Vec::with_capacity(ctors.len());
        for &(ctor, mid) in ctors {
            let target = match delegation_call(ctor) {
                Some(call) => {
                    self.enter_body(members, &|_| true, BodyKind::Constructor(mid), false);
                    self.declare_params(&ctor.params, mid);
                    let args = self.arg_types(&call.args);
                    self.applicable_constructor(id, &args)
                        .and_then(|target| ctors.iter().position(|(_, m)| *m == target))
                }
                None => None,
            };
            targets.push(target);
        }

        let mut marks = vec![Mark::Unvisited; ctors.len()];
        let mut recursive = vec![false; ctors.len()];
        let mut order = Vec::with_capacity(ctors.len());
        for index in 0..ctors.len() {
            if marks[index] == Mark::Unvisited {
                visit(index, &targets, &mut marks, &mut recursive, &mut order);
            }
        }

        // A constructor delegating to itself is only flagged through the
        // assignments it then makes.
        for (index, &(ctor, mid)) in ctors.iter().enumerate() {
            if !recursive[index] || targets[index] == Some(index) {
                continue;
            }
            let signature = self.table.method(mid).map(|m| m.signature()).unwrap_or_default();
            let anchor = delegation_call(ctor).map_or(ctor.id, |call| call.id);
            self.report(anchor, diagnostic_codes::RECURSIVE_CONSTRUCTOR_INVOCATION, &[&signature]);
        }
        (order, recursive)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(ctor = %ctor.name, params = ctor.params.len()))]
    fn check_constructor(
        &mut self,
        id: ClassId,
        ctor: &'a ConstructorDecl,
        mid: MethodId,
        members: &[Variable],
        init_state: &FixedBitSet,
        recursive: bool,
    ) {
        let delegates = delegation_call(ctor).is_some();
        let initial = |index: usize| !delegates && init_state.contains(index);
        self.enter_body(members, &initial, BodyKind::Constructor(mid), false);
        self.declare_params(&ctor.params, mid);
        self.scope.push_frame(FrameKind::Body);

        let stmts = ctor.body.stmts.as_slice();
        let rest = match stmts.first() {
            Some(Stmt::ConstructorCall(call)) => {
                self.check_explicit_constructor_call(id, call, recursive);
                &stmts[1..]
            }
            _ => {
                self.check_implicit_super(ctor.id);
                stmts
            }
        };
        let completion = self.check_stmts(rest);
        let end = completion.is_normal().then(|| self.scope.state());
        self.scope.pop_frame();

        // No normal end and no return: every path throws, so nothing is owed.
        let exit = match (end, self.body.exits.take()) {
            (Some(end), Some(exits)) => Scope::intersect([&end, &exits]),
            (Some(end), None) => Some(end),
            (None, exits) => exits,
        };

        let signature = self.table.method(mid).map(|m| m.signature()).unwrap_or_default();
        let field_count = self.table.entry(id).map_or(0, |e| e.fields.len());
        let mut guaranteed = FixedBitSet::with_capacity(field_count);
        let mut missing = Vec::new();
        for &(index, vid) in &self.body.field_vars {
            let var = self.scope.var(vid);
            if !var.is_final() || var.is_static() {
                continue;
            }
            if exit.as_ref().is_none_or(|state| state.contains(vid.index())) {
                guaranteed.insert(index);
            } else {
                missing.push(var.name.clone());
            }
        }
        for name in missing {
            self.report(ctor.id, diagnostic_codes::FINAL_FIELD_NOT_INITIALIZED, &[&name, &signature]);
        }
        self.guarantees.insert(mid, guaranteed.clone());

        let remaining = match self.table.entry_mut(id) {
            Some(entry) => {
                entry.pending_constructor_count = entry.pending_constructor_count.saturating_sub(1);
                entry.pending_constructor_count
            }
            None => 0,
        };
        if remaining > 0 {
            trace!(remaining, "rolling back final fields");
            self.commit_field_state(id, init_state);
        } else {
            self.commit_field_state(id, &guaranteed);
        }
    }

    fn check_explicit_constructor_call(&mut self, id: ClassId, call: &'a ConstructorCallStmt, recursive: bool) {
        for arg in &call.args {
            self.check_expr(arg);
        }
        let args = self.arg_types(&call.args);
        match call.kind {
            ConstructorCallKind::This => {
                let guarantee = if recursive {
                    None
                } else {
                    self.resolve_constructor(id, &args, call.id)
                        .and_then(|target| self.guarantees.get(&target).cloned())
                };
                let field_vars = self.body.field_vars.clone();
                for (index, vid) in field_vars {
                    if guarantee.as_ref().is_none_or(|g| g.contains(index)) {
                        self.scope.set_assigned(vid);
                    }
                }
            }
            ConstructorCallKind::Super => {
                let superclass = self.table.entry(id).and_then(|e| e.superclass);
                if let Some(superclass) = superclass {
                    self.resolve_constructor(superclass, &args, call.id);
                }
            }
        }
    }

    /// The implicit `super()` of a constructor without an explicit call.
    pub(crate) fn check_implicit_super(&mut self, anchor: NodeId) {
        let Some(class) = self.class else {
            return;
        };
        let Some(superclass) = self.table.entry(class).and_then(|e| e.superclass) else {
            return;
        };
        let Some(super_entry) = self.table.entry(superclass) else {
            return;
        };
        if super_entry.constructors().next().is_none() {
            return;
        }
        let access = self.type_context().access();
        let satisfied = super_entry.constructors().any(|(_, ctor)| {
            ctor.arity() == 0 && self.table.is_member_accessible(superclass, ctor.visibility(), access)
        });
        if !satisfied {
            let name = super_entry.simple_name.clone();
            self.report(anchor, diagnostic_codes::NO_DEFAULT_SUPER_CONSTRUCTOR, &[&name]);
        }
    }
}

#[cfg(test)]
#[path = "../tests/constructor_tests.rs"]
mod tests;
