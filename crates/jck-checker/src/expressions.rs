//! Reads, assignments and name resolution inside expressions.

use jck_ast::{AssignExpr, Expr, FieldAccessExpr, UnaryExpr};
use jck_binder::ClassId;
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;

use crate::scope::{Scope, VarId, VarOrigin};
use crate::state::{BodyKind, CheckerState};

/// `a.b.c` as its name segments, when `expr` is a plain dotted name.
pub(crate) fn dotted_path(expr: &Expr) -> Option<Vec<&str>> {
    match expr {
        Expr::Name(name) => Some(vec![name.name.as_str()]),
        Expr::FieldAccess(access) => {
            let mut path = dotted_path(&access.target)?;
            path.push(&access.name);
            Some(path)
        }
        _ => None,
    }
}

impl<'a> CheckerState<'_, 'a> {
    pub(crate) fn check_expr(&mut self, expr: &'a Expr) {
        if self.enter_nested(expr.id()) {
            self.check_expr_inner(expr);
        }
        self.leave_nested();
    }

    fn check_expr_inner(&mut self, expr: &'a Expr) {
        match expr {
            Expr::Literal(_) => {}
            Expr::Name(name) => self.check_name(name.id, &name.name),
            Expr::This(id) => self.check_this(*id),
            Expr::FieldAccess(access) => self.check_field_access(access),
            Expr::Assign(assign) => self.check_assign(assign),
            Expr::Unary(unary) if unary.op.is_update() => self.check_update(unary),
            Expr::Unary(unary) => self.check_expr(&unary.operand),
            Expr::Binary(binary) => {
                self.check_expr(&binary.left);
                if binary.op.is_short_circuit() {
                    // The right operand may not run.
                    let before = self.scope.state();
                    self.check_expr(&binary.right);
                    self.undo_since(&before);
                } else {
                    self.check_expr(&binary.right);
                }
            }
            Expr::Conditional(cond) => {
                self.check_expr(&cond.cond);
                let before = self.scope.state();
                self.check_expr(&cond.then_expr);
                let then_state = self.scope.state();
                self.scope.restore(before);
                self.check_expr(&cond.else_expr);
                let else_state = self.scope.state();
                if let Some(merged) = Scope::intersect([&then_state, &else_state]) {
                    self.scope.restore(merged);
                }
            }
            Expr::Call(call) => self.check_call(call),
            Expr::New(new) => self.check_new(new),
            Expr::NewArray(array) => {
                self.resolve_type(&array.ty);
                for dim in &array.dims {
                    self.check_expr(dim);
                }
            }
            Expr::Cast(cast) => {
                self.resolve_type(&cast.ty);
                self.check_expr(&cast.expr);
            }
            Expr::InstanceOf(test) => {
                self.check_expr(&test.expr);
                self.resolve_type(&test.ty);
            }
            Expr::ArrayAccess(access) => {
                self.check_expr(&access.array);
                self.check_expr(&access.index);
            }
        }
    }

    /// A simple name read as a value.
    fn check_name(&mut self, anchor: NodeId, name: &str) {
        match self.scope.lookup(name) {
            Some(vid) => {
                self.check_static_context(vid, anchor);
                self.scope.mark_use(vid, anchor, self.diagnostics);
            }
            None => {
                self.report(anchor, diagnostic_codes::CANNOT_FIND_SYMBOL_VARIABLE, &[name]);
            }
        }
    }

    fn check_this(&mut self, anchor: NodeId) {
        if self.body.is_static {
            self.report(anchor, diagnostic_codes::NON_STATIC_FROM_STATIC, &["this"]);
        }
    }

    /// Instance fields are not reachable from static bodies.
    fn check_static_context(&mut self, vid: VarId, anchor: NodeId) {
        let var = self.scope.var(vid);
        if self.body.is_static && var.is_field() && !var.is_static() {
            let name = var.name.clone();
            self.report(anchor, diagnostic_codes::NON_STATIC_FROM_STATIC, &[&name]);
        }
    }

    fn check_field_access(&mut self, access: &'a FieldAccessExpr) {
        if let Expr::This(id) = *access.target {
            self.check_this(id);
            match self.scope.lookup_field(&access.name) {
                Some(vid) => {
                    self.scope.mark_use(vid, access.id, self.diagnostics);
                }
                None => self.report(
                    access.id,
                    diagnostic_codes::CANNOT_FIND_SYMBOL_VARIABLE,
                    &[&access.name],
                ),
            }
            return;
        }
        self.check_receiver(&access.target);
    }

    /// Check the target of a field access or call.
    ///
    /// A dotted name whose head is not a variable is taken as a type (or
    /// package) qualifier. Returns the class it names, if any.
    pub(crate) fn check_receiver(&mut self, target: &'a Expr) -> Option<ClassId> {
        if let Some(path) = dotted_path(target)
            && self.scope.lookup(path[0]).is_none()
        {
            return self.check_type_qualifier(target, &path);
        }
        self.check_expr(target);
        None
    }

    fn check_type_qualifier(&mut self, target: &Expr, path: &[&str]) -> Option<ClassId> {
        let ctx = self.type_context();
        for len in (1..=path.len()).rev() {
            let prefix = path[..len].join(".");
            if let Some(class) = self.table.lookup_type_name(&ctx, &prefix) {
                return (len == path.len()).then_some(class);
            }
            if self.table.has_package(&prefix) {
                return None;
            }
        }
        self.report(target.id(), diagnostic_codes::CANNOT_FIND_SYMBOL_VARIABLE, &[path[0]]);
        None
    }

    // =========================================================================
    // Assignments
    // =========================================================================

    /// The variable written by an assignment target, if it is a simple name
    /// or `this.name`. Unknown names are reported.
    fn assigned_var(&mut self, target: &'a Expr) -> Option<VarId> {
        let (name, is_this) = target.assigned_name()?;
        let vid = if is_this {
            if let Expr::FieldAccess(access) = target
                && let Expr::This(id) = *access.target
            {
                self.check_this(id);
            }
            self.scope.lookup_field(name)
        } else {
            self.scope.lookup(name)
        };
        match vid {
            Some(vid) => {
                if !is_this {
                    self.check_static_context(vid, target.id());
                }
                Some(vid)
            }
            None => {
                self.report(target.id(), diagnostic_codes::CANNOT_FIND_SYMBOL_VARIABLE, &[name]);
                None
            }
        }
    }

    fn check_assign(&mut self, assign: &'a AssignExpr) {
        if assign.target.assigned_name().is_none() {
            self.check_expr(&assign.target);
            self.check_expr(&assign.value);
            return;
        }
        let vid = self.assigned_var(&assign.target);
        if let Some(vid) = vid
            && assign.op.is_some()
        {
            self.scope.mark_use(vid, assign.target.id(), self.diagnostics);
        }
        self.check_expr(&assign.value);
        if let Some(vid) = vid {
            self.assign_var(vid, assign.id);
        }
    }

    fn check_update(&mut self, unary: &'a UnaryExpr) {
        if unary.operand.assigned_name().is_none() {
            self.check_expr(&unary.operand);
            return;
        }
        if let Some(vid) = self.assigned_var(&unary.operand) {
            self.scope.mark_use(vid, unary.operand.id(), self.diagnostics);
            self.assign_var(vid, unary.id);
        }
    }

    /// Write to a variable at `site`.
    ///
    /// A final field may only be written by a constructor or initializer of
    /// its own class with matching staticness.
    fn assign_var(&mut self, vid: VarId, site: NodeId) {
        let var = self.scope.var(vid);
        let writable = match var.origin {
            VarOrigin::Field(field) => {
                Some(field.class) == self.class
                    && match self.body.kind {
                        BodyKind::Constructor(_) => !var.is_static(),
                        BodyKind::Initializer => var.is_static() == self.body.is_static,
                        BodyKind::Method(_) => false,
                    }
            }
            VarOrigin::Outer(_) => false,
            VarOrigin::Param | VarOrigin::Local => true,
        };
        if var.is_final() && !writable {
            let name = var.name.clone();
            self.report(site, diagnostic_codes::CANNOT_ASSIGN_FINAL, &[&name]);
            return;
        }
        self.scope.mark_assigned(vid, site, self.diagnostics);
    }
}
