//! Statements and flow merging.
//!
//! Assignment state flows through statements in order. Branches start from
//! the pre-branch state and merge by intersection over the paths that
//! complete normally. Loop bodies may not run, so whatever they assign is
//! undone after the loop.

use fixedbitset::FixedBitSet;
use jck_ast::{
    Block, DoWhileStmt, Expr, ForEachStmt, ForStmt, IfStmt, Literal, LocalVarDecl, ReturnStmt, Stmt,
    TryStmt, WhileStmt,
};
use jck_binder::simple_name;
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;

use crate::oracle::ExprType;
use crate::scope::{FrameKind, Scope, VarOrigin, Variable};
use crate::state::{BodyKind, CheckerState, Completion};

fn is_constant_true(cond: Option<&Expr>) -> bool {
    match cond {
        None => true,
        Some(Expr::Literal(lit)) => matches!(lit.value, Literal::Bool(true)),
        Some(_) => false,
    }
}

/// Jump counters saved around a loop body.
struct LoopMark {
    jumps: u32,
    breaks: u32,
    floor: usize,
    before: FixedBitSet,
}

impl<'a> CheckerState<'_, 'a> {
    pub(crate) fn check_block(&mut self, block: &'a Block) -> Completion {
        self.scope.push_frame(FrameKind::Body);
        let completion = self.check_stmts(&block.stmts);
        self.scope.pop_frame();
        completion
    }

    /// Check statements in order. The first statement after one that cannot
    /// complete normally is reported and the rest are skipped.
    pub(crate) fn check_stmts(&mut self, stmts: &'a [Stmt]) -> Completion {
        for (index, stmt) in stmts.iter().enumerate() {
            if self.check_stmt(stmt).is_normal() {
                continue;
            }
            if self.options.report_unreachable
                && let Some(next) = stmts.get(index + 1)
            {
                self.report(next.id(), diagnostic_codes::UNREACHABLE_STATEMENT, &[]);
            }
            return Completion::Abrupt;
        }
        Completion::Normal
    }

    pub(crate) fn check_stmt(&mut self, stmt: &'a Stmt) -> Completion {
        if !self.enter_nested(stmt.id()) {
            self.leave_nested();
            return Completion::Normal;
        }
        let completion = self.check_stmt_inner(stmt);
        self.leave_nested();
        completion
    }

    fn check_stmt_inner(&mut self, stmt: &'a Stmt) -> Completion {
        match stmt {
            Stmt::Block(block) => self.check_block(block),
            Stmt::LocalVar(local) => {
                self.check_local(local);
                Completion::Normal
            }
            Stmt::Expr(stmt) => {
                self.check_expr(&stmt.expr);
                Completion::Normal
            }
            Stmt::If(stmt) => self.check_if(stmt),
            Stmt::While(stmt) => self.check_while(stmt),
            Stmt::DoWhile(stmt) => self.check_do_while(stmt),
            Stmt::For(stmt) => self.check_for(stmt),
            Stmt::ForEach(stmt) => self.check_for_each(stmt),
            Stmt::Return(stmt) => self.check_return(stmt),
            Stmt::Throw(stmt) => {
                self.check_expr(&stmt.expr);
                Completion::Abrupt
            }
            Stmt::Break(_) => {
                self.body.jumps += 1;
                self.body.breaks += 1;
                Completion::Abrupt
            }
            Stmt::Continue(_) => {
                self.body.jumps += 1;
                Completion::Abrupt
            }
            Stmt::Try(stmt) => self.check_try(stmt),
            Stmt::ConstructorCall(call) => {
                // Only reached when the call is not the first constructor statement.
                for arg in &call.args {
                    self.check_expr(arg);
                }
                self.report(
                    call.id,
                    diagnostic_codes::CONSTRUCTOR_CALL_NOT_FIRST,
                    &[call.kind.keyword()],
                );
                Completion::Normal
            }
            Stmt::Empty(_) => Completion::Normal,
        }
    }

    pub(crate) fn check_local(&mut self, local: &'a LocalVarDecl) {
        let ty = self.resolve_type(&local.ty);
        if let Some(init) = &local.init {
            self.check_expr(init);
        }
        self.declare_local(local, ty, local.init.is_some());
    }

    fn declare_local(&mut self, local: &LocalVarDecl, ty: String, assigned: bool) {
        let var = Variable {
            name: local.name.clone(),
            ty,
            modifiers: local.modifiers,
            origin: VarOrigin::Local,
            decl: local.id,
        };
        if self.scope.declare(var, assigned).is_err() {
            self.report(local.id, diagnostic_codes::DUPLICATE_LOCAL, &[&local.name]);
        }
    }

    fn check_if(&mut self, stmt: &'a IfStmt) -> Completion {
        self.check_expr(&stmt.cond);
        let before = self.scope.state();

        let mut ends = Vec::with_capacity(2);
        if self.check_stmt(&stmt.then_branch).is_normal() {
            ends.push(self.scope.state());
        }
        self.scope.restore(before.clone());
        match &stmt.else_branch {
            Some(else_branch) => {
                if self.check_stmt(else_branch).is_normal() {
                    ends.push(self.scope.state());
                }
            }
            None => ends.push(before.clone()),
        }
        self.merge_ends(&ends, before)
    }

    /// Continue from the intersection of the normal ends, or from `fallback`
    /// when no path completes normally.
    fn merge_ends(&mut self, ends: &[FixedBitSet], fallback: FixedBitSet) -> Completion {
        match Scope::intersect(ends) {
            Some(merged) => {
                self.scope.restore(merged);
                Completion::Normal
            }
            None => {
                self.scope.restore(fallback);
                Completion::Abrupt
            }
        }
    }

    // =========================================================================
    // Loops
    // =========================================================================

    fn enter_loop(&mut self) -> LoopMark {
        let mark = LoopMark {
            jumps: self.body.jumps,
            breaks: self.body.breaks,
            floor: self.scope.var_count(),
            before: self.scope.state(),
        };
        self.body.jumps = 0;
        self.body.breaks = 0;
        mark
    }

    /// Report finals from outside the loop assigned by a body that can run
    /// again, undo the body's assignments and restore the jump counters.
    /// Returns whether the body executed a `break`.
    fn leave_loop(&mut self, mark: LoopMark, loop_id: NodeId, repeats: bool) -> bool {
        if repeats {
            let assigned = self.scope.assigned_since(&mark.before);
            let names: Vec<String> = assigned
                .iter()
                .filter(|vid| vid.index() < mark.floor)
                .map(|vid| self.scope.var(*vid))
                .filter(|var| var.is_final())
                .map(|var| var.name.clone())
                .collect();
            for name in names {
                self.report(loop_id, diagnostic_codes::ASSIGNED_IN_LOOP, &[&name]);
            }
        }
        self.undo_since(&mark.before);
        let broke = self.body.breaks > 0;
        self.body.jumps = mark.jumps;
        self.body.breaks = mark.breaks;
        broke
    }

    fn loop_completion(cond: Option<&Expr>, broke: bool) -> Completion {
        if is_constant_true(cond) && !broke {
            Completion::Abrupt
        } else {
            Completion::Normal
        }
    }

    fn check_while(&mut self, stmt: &'a WhileStmt) -> Completion {
        self.check_expr(&stmt.cond);
        let mark = self.enter_loop();
        let body = self.check_stmt(&stmt.body);
        let repeats = body.is_normal() || self.body.jumps > self.body.breaks;
        let broke = self.leave_loop(mark, stmt.id, repeats);
        Self::loop_completion(Some(&stmt.cond), broke)
    }

    fn check_do_while(&mut self, stmt: &'a DoWhileStmt) -> Completion {
        let mark = self.enter_loop();
        let body = self.check_stmt(&stmt.body);
        let jumped = self.body.jumps > 0;
        let reaches_cond = body.is_normal() || self.body.jumps > self.body.breaks;
        if reaches_cond {
            self.check_expr(&stmt.cond);
        }

        // The body runs once; its assignments stand unless a jump may have
        // skipped part of it.
        let after_body = self.scope.state();
        let broke = self.body.breaks > 0;
        let before = mark.before.clone();
        self.leave_loop(mark, stmt.id, reaches_cond);
        if body.is_normal() && !jumped {
            self.scope.restore(after_body);
        } else {
            self.scope.restore(before);
        }
        if !reaches_cond && !broke {
            return Completion::Abrupt;
        }
        Self::loop_completion(Some(&stmt.cond), broke)
    }

    fn check_for(&mut self, stmt: &'a ForStmt) -> Completion {
        self.scope.push_frame(FrameKind::Body);
        for init in &stmt.init {
            self.check_stmt(init);
        }
        if let Some(cond) = &stmt.cond {
            self.check_expr(cond);
        }
        let mark = self.enter_loop();
        let body = self.check_stmt(&stmt.body);
        let repeats = body.is_normal() || self.body.jumps > self.body.breaks;
        if repeats {
            for update in &stmt.update {
                self.check_expr(update);
            }
        }
        let broke = self.leave_loop(mark, stmt.id, repeats);
        self.scope.pop_frame();
        Self::loop_completion(stmt.cond.as_ref(), broke)
    }

    fn check_for_each(&mut self, stmt: &'a ForEachStmt) -> Completion {
        self.check_expr(&stmt.iterable);
        self.scope.push_frame(FrameKind::Body);
        let ty = self.resolve_type(&stmt.var.ty);
        self.declare_local(&stmt.var, ty, true);
        let mark = self.enter_loop();
        let body = self.check_stmt(&stmt.body);
        let repeats = body.is_normal() || self.body.jumps > self.body.breaks;
        self.leave_loop(mark, stmt.id, repeats);
        self.scope.pop_frame();
        Completion::Normal
    }

    // =========================================================================
    // Exits
    // =========================================================================

    fn check_return(&mut self, stmt: &'a ReturnStmt) -> Completion {
        if let Some(value) = &stmt.value {
            self.check_expr(value);
        }
        match self.body.kind {
            BodyKind::Constructor(_) => {
                if stmt.value.is_some() {
                    self.report(stmt.id, diagnostic_codes::RETURN_VALUE_IN_CONSTRUCTOR, &[]);
                }
            }
            BodyKind::Method(_) => {
                let expected = self
                    .body
                    .return_type
                    .clone()
                    .filter(|ret| ret != "void");
                if let Some(expected) = expected {
                    let missing = match &stmt.value {
                        None => true,
                        Some(value) => self.type_of(value) == ExprType::Void,
                    };
                    if missing {
                        self.report(
                            stmt.id,
                            diagnostic_codes::MISSING_RETURN_VALUE,
                            &[simple_name(&expected)],
                        );
                    }
                }
            }
            BodyKind::Initializer => {}
        }
        self.record_exit();
        Completion::Abrupt
    }

    fn check_try(&mut self, stmt: &'a TryStmt) -> Completion {
        let before = self.scope.state();
        // Returns under a finally are held back until the finally has run.
        let outer_exits = if stmt.finally.is_some() {
            Some(self.body.exits.take())
        } else {
            None
        };
        let mut ends = Vec::with_capacity(stmt.catches.len() + 1);
        if self.check_block(&stmt.block).is_normal() {
            ends.push(self.scope.state());
        }
        for catch in &stmt.catches {
            self.scope.restore(before.clone());
            self.scope.push_frame(FrameKind::Body);
            let ty = self.resolve_type(&catch.param.ty);
            let param = Variable {
                name: catch.param.name.clone(),
                ty,
                modifiers: catch.param.modifiers,
                origin: VarOrigin::Param,
                decl: catch.param.id,
            };
            if self.scope.declare(param, true).is_err() {
                self.report(catch.param.id, diagnostic_codes::DUPLICATE_LOCAL, &[&catch.param.name]);
            }
            if self.check_block(&catch.body).is_normal() {
                ends.push(self.scope.state());
            }
            self.scope.pop_frame();
        }
        let completion = self.merge_ends(&ends, before.clone());

        let (Some(finally), Some(outer_exits)) = (&stmt.finally, outer_exits) else {
            return completion;
        };
        let held_exits = std::mem::replace(&mut self.body.exits, outer_exits);
        // The finally block may run after any prefix of the try, so it starts
        // from the pre-try state; what it assigns holds afterwards.
        let merged = self.scope.state();
        self.scope.restore(before.clone());
        let finally_completion = self.check_block(finally);
        let assigned = self.scope.assigned_since(&before);
        self.scope.restore(merged);
        for &vid in &assigned {
            self.scope.set_assigned(vid);
        }
        if let Some(mut held) = held_exits.filter(|_| finally_completion.is_normal()) {
            for vid in &assigned {
                held.grow(vid.index() + 1);
                held.insert(vid.index());
            }
            self.merge_exit(held);
        }
        if finally_completion.is_normal() {
            completion
        } else {
            Completion::Abrupt
        }
    }
}

#[cfg(test)]
#[path = "../tests/flow_tests.rs"]
mod tests;
