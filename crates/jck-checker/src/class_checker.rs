//! Per-class orchestration of the checking pass.

use fixedbitset::FixedBitSet;
use jck_ast::{Member, Param, TypeDecl};
use jck_binder::{ClassId, MethodId, find_registered, signature_text};
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;

use crate::scope::{FrameKind, Scope, VarOrigin, Variable};
use crate::state::{BodyContext, BodyKind, CheckerState};

impl<'a> CheckerState<'_, 'a> {
    /// Check one class body. `outer` holds the fields of enclosing classes
    /// visible from this class (all considered assigned).
    #[tracing::instrument(level = "debug", skip_all, fields(class = %decl.name))]
    pub(crate) fn check_class(&mut self, decl: &'a TypeDecl, outer: &[Variable]) {
        let Some(id) = self.table.class_for_decl(decl.id) else {
            return;
        };
        if self.table.entry(id).is_none() {
            return;
        }
        let saved_class = self.class.replace(id);

        self.check_overrides(id);
        let members = self.member_vars(id, outer);
        self.check_static_initializers(decl, &members);
        let init_state = self.check_instance_initializers(decl, &members);
        if !decl.is_interface() {
            self.check_constructors(decl, id, &members, &init_state);
        }
        self.check_methods(decl, id, &members);

        let visible: Vec<Variable> = members
            .iter()
            .map(|var| Variable {
                origin: match var.origin {
                    VarOrigin::Field(f) | VarOrigin::Outer(f) => VarOrigin::Outer(f),
                    other => other,
                },
                ..var.clone()
            })
            .collect();
        for nested in decl.nested_types() {
            let is_static = self
                .table
                .class_for_decl(nested.id)
                .is_some_and(|nid| self.table.modifiers_of(nid).is_static());
            if is_static {
                let statics: Vec<Variable> =
                    visible.iter().filter(|v| v.is_static()).cloned().collect();
                self.check_class(nested, &statics);
            } else {
                self.check_class(nested, &visible);
            }
        }

        self.class = saved_class;
    }

    /// Variables visible in every body of `id`: enclosing-class fields,
    /// inherited non-private fields (farthest ancestor first) and own fields.
    fn member_vars(&self, id: ClassId, outer: &[Variable]) -> Vec<Variable> {
        let mut vars = outer.to_vec();
        let Some(entry) = self.table.entry(id) else {
            return vars;
        };
        for field_id in entry.super_vars(self.table).into_iter().rev() {
            let Some(field) = self.table.field(field_id) else {
                continue;
            };
            if field.visibility() == jck_ast::Visibility::Private {
                continue;
            }
            vars.push(Variable {
                name: field.name.clone(),
                ty: field.ty.clone(),
                modifiers: field.modifiers,
                origin: VarOrigin::Field(field_id),
                decl: field.decl,
            });
        }
        for (index, field) in entry.fields.iter().enumerate() {
            vars.push(Variable {
                name: field.name.clone(),
                ty: field.ty.clone(),
                modifiers: field.modifiers,
                origin: VarOrigin::Field(entry.field_id(index)),
                decl: field.decl,
            });
        }
        vars
    }

    /// Start a fresh body scope seeded with the class members.
    ///
    /// `initial` decides, per own field index, whether an own instance final
    /// starts with a value; every other member variable does.
    pub(crate) fn enter_body(
        &mut self,
        members: &[Variable],
        initial: &dyn Fn(usize) -> bool,
        kind: BodyKind,
        is_static: bool,
    ) {
        let mut scope = Scope::new();
        scope.push_frame(FrameKind::Members);
        let mut field_vars = Vec::new();
        for var in members {
            let own_index = match var.origin {
                VarOrigin::Field(field) if Some(field.class) == self.class => {
                    Some(field.index as usize)
                }
                _ => None,
            };
            let assigned = match own_index {
                Some(index) if var.is_final() && !var.is_static() => initial(index),
                _ => true,
            };
            if let Ok(vid) = scope.declare(var.clone(), assigned)
                && let Some(index) = own_index
            {
                field_vars.push((index, vid));
            }
        }
        scope.push_frame(FrameKind::Body);
        self.scope = scope;
        self.body = BodyContext {
            kind,
            is_static,
            field_vars,
            ..BodyContext::default()
        };
    }

    /// Declare the parameters of a registered method in the current body.
    pub(crate) fn declare_params(&mut self, params: &'a [Param], method: MethodId) {
        let types: Vec<String> = match self.table.method(method) {
            Some(entry) => entry.params.iter().map(|p| p.ty.clone()).collect(),
            None => params.iter().map(|p| p.ty.display_name()).collect(),
        };
        for (param, ty) in params.iter().zip(types) {
            let var = Variable {
                name: param.name.clone(),
                ty,
                modifiers: param.modifiers,
                origin: VarOrigin::Param,
                decl: param.id,
            };
            // Duplicate parameter names were reported by the structural pass.
            self.scope.declare(var, true).ok();
        }
    }

    /// Own fields with a value in the current scope, by field index.
    pub(crate) fn own_field_state(&self, id: ClassId) -> FixedBitSet {
        let len = self.table.entry(id).map_or(0, |e| e.fields.len());
        let mut state = FixedBitSet::with_capacity(len);
        for &(index, vid) in &self.body.field_vars {
            if self.scope.has_value(vid) && index < len {
                state.insert(index);
            }
        }
        state
    }

    /// Store the assignment state of own instance finals in the field entries.
    pub(crate) fn commit_field_state(&mut self, id: ClassId, state: &FixedBitSet) {
        let Some(entry) = self.table.entry_mut(id) else {
            return;
        };
        for (index, field) in entry.fields.iter_mut().enumerate() {
            if field.is_final() && !field.is_static() {
                field.has_value = state.contains(index);
            }
        }
    }

    /// Pair a body declaration with its registered entry.
    ///
    /// Failing to find one means the passes disagree, which is reported as
    /// an internal error.
    pub(crate) fn pair_declaration(
        &mut self,
        id: ClassId,
        decl: NodeId,
        name: &str,
        is_constructor: bool,
        params: &[Param],
    ) -> Option<MethodId> {
        let texts: Vec<String> = params.iter().map(|p| p.ty.display_name()).collect();
        let entry = self.table.entry(id)?;
        if let Some(index) = find_registered(entry, name, is_constructor, &texts) {
            return Some(entry.method_id(index));
        }
        let class_name = entry.qualified_name.clone();
        let signature = signature_text(name, &texts);
        tracing::warn!(%signature, class = %class_name, "declaration has no registered entry");
        self.report(
            decl,
            diagnostic_codes::INTERNAL_UNMATCHED_DECLARATION,
            &[&signature, &class_name],
        );
        None
    }

    // =========================================================================
    // Initializers and methods
    // =========================================================================

    fn check_static_initializers(&mut self, decl: &'a TypeDecl, members: &[Variable]) {
        let is_static_field = |member: &Member| match member {
            Member::Field(field) => field.modifiers.is_static() || decl.is_interface(),
            Member::Initializer(init) => init.is_static,
            _ => false,
        };
        if !decl.members.iter().any(is_static_field) {
            return;
        }
        self.enter_body(members, &|_| true, BodyKind::Initializer, true);
        for member in decl.members.iter().filter(|m| is_static_field(m)) {
            match member {
                Member::Field(field) => {
                    if let Some(init) = &field.init {
                        self.check_expr(init);
                    }
                }
                Member::Initializer(init) => {
                    self.check_block(&init.body);
                }
                _ => {}
            }
        }
    }

    /// Field initializers and instance initializer blocks, in source order.
    ///
    /// Returns the own fields assigned once they have all run.
    fn check_instance_initializers(&mut self, decl: &'a TypeDecl, members: &[Variable]) -> FixedBitSet {
        let Some(id) = self.class else {
            return FixedBitSet::new();
        };
        self.enter_body(members, &|_| false, BodyKind::Initializer, false);
        if decl.is_interface() {
            return self.own_field_state(id);
        }
        for member in &decl.members {
            match member {
                Member::Field(field) if !field.modifiers.is_static() => {
                    let Some(init) = &field.init else {
                        continue;
                    };
                    self.check_expr(init);
                    let index = self
                        .table
                        .entry(id)
                        .and_then(|e| e.fields.iter().position(|f| f.decl == field.id));
                    let var = self
                        .body
                        .field_vars
                        .iter()
                        .find(|(i, _)| Some(*i) == index)
                        .map(|(_, vid)| *vid);
                    if let Some(vid) = var {
                        self.scope.set_assigned(vid);
                    }
                }
                Member::Initializer(init) if !init.is_static => {
                    self.check_block(&init.body);
                }
                _ => {}
            }
        }
        self.own_field_state(id)
    }

    fn check_methods(&mut self, decl: &'a TypeDecl, id: ClassId, members: &[Variable]) {
        for method in decl.methods() {
            if self.table.is_rejected(method.id) {
                continue;
            }
            let Some(mid) = self.pair_declaration(id, method.id, &method.name, false, &method.params)
            else {
                continue;
            };
            let Some(body) = &method.body else {
                continue;
            };
            let (is_static, return_type) = match self.table.method(mid) {
                Some(entry) => (entry.is_static(), entry.return_type.clone()),
                None => (method.modifiers.is_static(), None),
            };
            self.enter_body(members, &|_| true, BodyKind::Method(mid), is_static);
            self.body.return_type.clone_from(&return_type);
            self.declare_params(&method.params, mid);

            let completion = self.check_block(body);
            let returns_value = return_type.as_deref().is_some_and(|ret| ret != "void");
            if completion.is_normal() && returns_value {
                self.report(method.id, diagnostic_codes::MISSING_RETURN, &[]);
            }
        }
    }
}
