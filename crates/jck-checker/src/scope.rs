//! Scope and definite-assignment tracking.
//!
//! A `Scope` is a stack of frames over an append-only variable arena. Each
//! frame remembers which variables it made visible and the assignment state
//! at the moment it was entered. The assignment state itself is a bitset
//! indexed by `VarId`.
//!
//! Popping a block frame takes its locals out of scope and clears their
//! bits. Assignments to variables of outer frames persist: a block runs
//! sequentially, so what it assigned stays assigned afterwards. Undoing
//! assignments (loop bodies, sibling constructors) is explicit through
//! `unassign`.

use fixedbitset::FixedBitSet;
use jck_ast::Modifiers;
use jck_binder::FieldId;
use jck_common::diagnostics::diagnostic_codes;
use jck_common::{Diagnostics, NodeId};
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

impl VarId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VarOrigin {
    /// Field of the class being checked or one of its ancestors.
    Field(FieldId),
    /// Field of an enclosing class, seen from a nested class body.
    Outer(FieldId),
    Param,
    Local,
}

#[derive(Clone, Debug)]
pub struct Variable {
    pub name: String,
    pub ty: String,
    pub modifiers: Modifiers,
    pub origin: VarOrigin,
    pub decl: NodeId,
}

impl Variable {
    #[must_use]
    pub fn is_final(&self) -> bool {
        self.modifiers.is_final()
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }

    #[must_use]
    pub fn is_field(&self) -> bool {
        matches!(self.origin, VarOrigin::Field(_) | VarOrigin::Outer(_))
    }

    #[must_use]
    pub fn field_id(&self) -> Option<FieldId> {
        match self.origin {
            VarOrigin::Field(id) | VarOrigin::Outer(id) => Some(id),
            VarOrigin::Param | VarOrigin::Local => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// Fields (own, inherited, enclosing). Locals may shadow these.
    Members,
    /// Parameters and block locals.
    Body,
}

#[derive(Clone, Debug)]
struct Frame {
    kind: FrameKind,
    vars: Vec<VarId>,
    snapshot: FixedBitSet,
}

#[derive(Clone, Debug, Default)]
pub struct Scope {
    vars: Vec<Variable>,
    frames: Vec<Frame>,
    assigned: FixedBitSet,
}

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Frames
    // =========================================================================

    pub fn push_frame(&mut self, kind: FrameKind) {
        self.frames.push(Frame {
            kind,
            vars: Vec::new(),
            snapshot: self.assigned.clone(),
        });
    }

    /// Leave the innermost frame.
    ///
    /// Returns the outer-frame variables that became assigned while the
    /// frame was active.
    pub fn pop_frame(&mut self) -> Vec<VarId> {
        let Some(frame) = self.frames.pop() else {
            return Vec::new();
        };
        for var in &frame.vars {
            self.assigned.set(var.index(), false);
        }
        self.assigned_since(&frame.snapshot)
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    // =========================================================================
    // Declarations and lookup
    // =========================================================================

    /// Make a variable visible in the innermost frame.
    ///
    /// Parameters and locals may not redeclare a visible parameter or local;
    /// the existing variable is returned as the error.
    pub fn declare(&mut self, var: Variable, assigned: bool) -> Result<VarId, VarId> {
        if matches!(var.origin, VarOrigin::Param | VarOrigin::Local)
            && let Some(existing) = self.lookup_in(FrameKind::Body, &var.name)
        {
            return Err(existing);
        }
        let id = VarId(self.vars.len() as u32);
        trace!(name = %var.name, id = id.0, assigned, "declare");
        self.vars.push(var);
        self.assigned.grow(self.vars.len());
        self.assigned.set(id.index(), assigned);
        if let Some(frame) = self.frames.last_mut() {
            frame.vars.push(id);
        }
        Ok(id)
    }

    /// Innermost frame first; within a frame the latest declaration wins.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<VarId> {
        self.frames
            .iter()
            .rev()
            .flat_map(|frame| frame.vars.iter().rev())
            .copied()
            .find(|id| self.vars[id.index()].name == name)
    }

    /// Field named `name`, skipping parameters and locals (`this.name`).
    #[must_use]
    pub fn lookup_field(&self, name: &str) -> Option<VarId> {
        self.lookup_in(FrameKind::Members, name)
    }

    fn lookup_in(&self, kind: FrameKind, name: &str) -> Option<VarId> {
        self.frames
            .iter()
            .rev()
            .filter(|frame| frame.kind == kind)
            .flat_map(|frame| frame.vars.iter().rev())
            .copied()
            .find(|id| self.vars[id.index()].name == name)
    }

    #[must_use]
    pub fn var(&self, id: VarId) -> &Variable {
        &self.vars[id.index()]
    }

    #[must_use]
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    #[must_use]
    pub fn has_value(&self, id: VarId) -> bool {
        self.assigned.contains(id.index())
    }

    // =========================================================================
    // Assignment state
    // =========================================================================

    /// Record an assignment at `site`.
    ///
    /// A final variable that already has a value is reported and left
    /// unchanged. Returns whether the assignment was accepted.
    pub fn mark_assigned(&mut self, id: VarId, site: NodeId, diagnostics: &mut Diagnostics) -> bool {
        let var = &self.vars[id.index()];
        if var.is_final() && self.has_value(id) {
            trace!(name = %var.name, "assignment to final with a value");
            diagnostics.report(site, diagnostic_codes::CANNOT_ASSIGN_FINAL, &[&var.name]);
            return false;
        }
        self.assigned.insert(id.index());
        true
    }

    /// Record a read at `site`; reading a variable without a value is reported.
    pub fn mark_use(&self, id: VarId, site: NodeId, diagnostics: &mut Diagnostics) -> bool {
        if self.has_value(id) {
            return true;
        }
        let var = &self.vars[id.index()];
        diagnostics.report(site, diagnostic_codes::MAY_NOT_HAVE_VALUE, &[&var.name]);
        false
    }

    /// Give a variable a value without any check (initializers, delegation).
    pub fn set_assigned(&mut self, id: VarId) {
        self.assigned.insert(id.index());
    }

    pub fn unassign(&mut self, ids: &[VarId]) {
        for id in ids {
            trace!(name = %self.vars[id.index()].name, "unassign");
            self.assigned.set(id.index(), false);
        }
    }

    #[must_use]
    pub fn state(&self) -> FixedBitSet {
        self.assigned.clone()
    }

    /// Replace the assignment state, e.g. to start a branch from the pre-branch state.
    pub fn restore(&mut self, mut state: FixedBitSet) {
        state.grow(self.vars.len());
        self.assigned = state;
    }

    /// Variables assigned now that were not assigned in `snapshot`.
    #[must_use]
    pub fn assigned_since(&self, snapshot: &FixedBitSet) -> Vec<VarId> {
        self.assigned
            .ones()
            .filter(|&i| !snapshot.contains(i))
            .map(|i| VarId(i as u32))
            .collect()
    }

    /// Intersection of the end states of normally completing paths.
    #[must_use]
    pub fn intersect<'s>(states: impl IntoIterator<Item = &'s FixedBitSet>) -> Option<FixedBitSet> {
        let mut iter = states.into_iter();
        let mut merged = iter.next()?.clone();
        for state in iter {
            let len = merged.len().max(state.len());
            merged.grow(len);
            merged.intersect_with(state);
        }
        Some(merged)
    }
}

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod tests;
