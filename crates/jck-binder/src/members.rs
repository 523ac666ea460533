//! Member registration for the structural pass.

use jck_ast::{
    ConstructorCallKind, ConstructorDecl, FieldDecl, Member, MethodDecl, Modifiers, Param, Stmt,
    TypeRef, Visibility,
};
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::names::{find_registered, signature_text};
use crate::resolve::TypeContext;
use crate::state::Binder;
use crate::symbols::{ClassId, FieldEntry, FieldOwner, MethodEntry, MethodId, ThrowsEntry};
use crate::table::DeclSite;

impl<'a> Binder<'_, 'a> {
    pub(crate) fn bind_members(&mut self, id: ClassId, site: DeclSite<'a>) {
        let ctx = TypeContext::for_unit(site.unit, Some(id));
        let in_interface = site.decl.is_interface();
        for member in &site.decl.members {
            match member {
                Member::Field(field) => self.bind_field(id, &ctx, field, in_interface),
                Member::Method(method) => self.bind_method(id, &ctx, method, in_interface),
                Member::Constructor(ctor) => self.bind_constructor(id, &ctx, ctor),
                Member::Initializer(_) | Member::Type(_) => {}
            }
        }
        if !in_interface {
            self.add_default_constructor(id);
        }
    }

    // =========================================================================
    // Fields
    // =========================================================================

    fn bind_field(
        &mut self,
        id: ClassId,
        ctx: &TypeContext<'_>,
        field: &FieldDecl,
        in_interface: bool,
    ) {
        let resolved = self.table.resolve_type_ref(ctx, &field.ty, self.diagnostics);
        let ty = self.table.type_text(&resolved, &field.ty);

        let mut modifiers = field.modifiers;
        if in_interface {
            modifiers = modifiers.with_visibility(Visibility::Public)
                | Modifiers::STATIC
                | Modifiers::FINAL;
        }
        let has_initializer = field.init.is_some();
        if modifiers.is_static() && modifiers.is_final() && !has_initializer {
            self.report(
                ctx.file,
                field.id,
                diagnostic_codes::STATIC_FINAL_NOT_INITIALIZED,
                &[&field.name],
            );
        }

        if let Some(owner) = self.field_declared_in(id, &field.name) {
            let owner_name = self.table.name_of(owner).to_string();
            self.report(
                ctx.file,
                field.id,
                diagnostic_codes::DUPLICATE_FIELD,
                &[&field.name, &owner_name],
            );
        }

        let entry = FieldEntry {
            name: field.name.clone(),
            modifiers,
            ty,
            has_value: has_initializer || !modifiers.is_final(),
            has_initializer,
            owner: FieldOwner::Class(id),
            decl: field.id,
        };
        if let Some(class) = self.table.entry_mut(id) {
            class.fields.push(entry);
        }
    }

    /// The class (this one or an ancestor) that already declares `name`.
    fn field_declared_in(&self, id: ClassId, name: &str) -> Option<ClassId> {
        std::iter::once(id)
            .chain(self.table.ancestors(id))
            .find(|&c| {
                self.table
                    .entry(c)
                    .is_some_and(|entry| entry.fields.iter().any(|f| f.name == name))
            })
    }

    // =========================================================================
    // Methods and constructors
    // =========================================================================

    fn bind_method(
        &mut self,
        id: ClassId,
        ctx: &TypeContext<'_>,
        method: &MethodDecl,
        in_interface: bool,
    ) {
        let mut modifiers = method.modifiers;
        if in_interface {
            if modifiers.explicit_visibility().is_none() {
                modifiers = modifiers.with_visibility(Visibility::Public);
            }
            if method.body.is_none() && !modifiers.intersects(Modifiers::STATIC | Modifiers::DEFAULT)
            {
                modifiers |= Modifiers::ABSTRACT;
            }
        }

        if method.name == self.table.simple_name_of(id) {
            self.report(
                ctx.file,
                method.id,
                diagnostic_codes::METHOD_NAMED_AS_CLASS,
                &[&method.name],
            );
            self.table.mark_rejected(method.id);
            return;
        }

        let Some(mid) = self.next_method_id(id) else {
            return;
        };
        let params = self.bind_params(ctx, mid, &method.name, &method.params);
        if self.reject_duplicate(id, ctx, method.id, &method.name, false, &params) {
            return;
        }

        let resolved = self
            .table
            .resolve_type_ref(ctx, &method.return_type, self.diagnostics);
        let return_type = self.table.type_text(&resolved, &method.return_type);
        let throws = self.bind_throws(ctx, &method.throws);
        self.check_method_body(ctx, method, modifiers, in_interface);

        let entry = MethodEntry {
            name: method.name.clone(),
            modifiers,
            params,
            throws,
            return_type: Some(return_type),
            owner: id,
            is_constructor: false,
            delegates: false,
            synthetic: false,
            decl: method.id,
        };
        if let Some(class) = self.table.entry_mut(id) {
            class.methods.push(entry);
        }
    }

    fn check_method_body(
        &mut self,
        ctx: &TypeContext<'_>,
        method: &MethodDecl,
        modifiers: Modifiers,
        in_interface: bool,
    ) {
        let has_body = method.body.is_some();
        let code = if in_interface {
            let may_have_body = self.language_level.allows_interface_method_bodies()
                && modifiers.intersects(Modifiers::STATIC | Modifiers::DEFAULT);
            if has_body && !may_have_body {
                let level = self.language_level.as_str();
                self.report(
                    ctx.file,
                    method.id,
                    diagnostic_codes::INTERFACE_METHOD_BODY_NOT_ALLOWED,
                    &[&method.name, level],
                );
                return;
            }
            (!has_body && may_have_body).then_some(diagnostic_codes::MISSING_METHOD_BODY)
        } else if modifiers.is_abstract() && has_body {
            Some(diagnostic_codes::ABSTRACT_METHOD_WITH_BODY)
        } else if !has_body && !modifiers.intersects(Modifiers::ABSTRACT | Modifiers::NATIVE) {
            Some(diagnostic_codes::MISSING_METHOD_BODY)
        } else {
            None
        };
        if let Some(code) = code {
            self.report(ctx.file, method.id, code, &[&method.name]);
        }
    }

    fn bind_constructor(&mut self, id: ClassId, ctx: &TypeContext<'_>, ctor: &ConstructorDecl) {
        let Some(mid) = self.next_method_id(id) else {
            return;
        };
        let params = self.bind_params(ctx, mid, &ctor.name, &ctor.params);
        if self.reject_duplicate(id, ctx, ctor.id, &ctor.name, true, &params) {
            return;
        }
        let throws = self.bind_throws(ctx, &ctor.throws);
        let delegates = matches!(
            ctor.body.stmts.first(),
            Some(Stmt::ConstructorCall(call)) if call.kind == ConstructorCallKind::This
        );

        let entry = MethodEntry {
            name: ctor.name.clone(),
            modifiers: ctor.modifiers,
            params,
            throws,
            return_type: None,
            owner: id,
            is_constructor: true,
            delegates,
            synthetic: false,
            decl: ctor.id,
        };
        if let Some(class) = self.table.entry_mut(id) {
            class.methods.push(entry);
            class.pending_constructor_count += 1;
        }
    }

    /// Implicit public no-arg constructor for classes that declare none.
    fn add_default_constructor(&mut self, id: ClassId) {
        let Some(class) = self.table.entry_mut(id) else {
            return;
        };
        if class.constructors().next().is_some() {
            return;
        }
        class.methods.push(MethodEntry {
            name: class.simple_name.clone(),
            modifiers: Modifiers::PUBLIC,
            params: Vec::new(),
            throws: SmallVec::new(),
            return_type: None,
            owner: id,
            is_constructor: true,
            delegates: false,
            synthetic: true,
            decl: NodeId::NONE,
        });
    }

    fn next_method_id(&self, id: ClassId) -> Option<MethodId> {
        let class = self.table.entry(id)?;
        Some(class.method_id(class.methods.len()))
    }

    /// Report and reject a second declaration of an existing signature.
    fn reject_duplicate(
        &mut self,
        id: ClassId,
        ctx: &TypeContext<'_>,
        decl: NodeId,
        name: &str,
        is_constructor: bool,
        params: &[FieldEntry],
    ) -> bool {
        let param_types: Vec<String> = params.iter().map(|p| p.ty.clone()).collect();
        let Some(class) = self.table.entry(id) else {
            return true;
        };
        if find_registered(class, name, is_constructor, &param_types).is_none() {
            return false;
        }
        let signature = signature_text(name, &param_types);
        let class_name = class.qualified_name.clone();
        tracing::debug!(%signature, class = %class_name, "duplicate signature rejected");
        self.report(
            ctx.file,
            decl,
            diagnostic_codes::DUPLICATE_METHOD,
            &[&signature, &class_name],
        );
        self.table.mark_rejected(decl);
        true
    }

    fn bind_params(
        &mut self,
        ctx: &TypeContext<'_>,
        owner: MethodId,
        member_name: &str,
        params: &[Param],
    ) -> Vec<FieldEntry> {
        let mut seen = FxHashSet::default();
        let mut entries = Vec::with_capacity(params.len());
        for param in params {
            if !seen.insert(param.name.as_str()) {
                self.report(
                    ctx.file,
                    param.id,
                    diagnostic_codes::DUPLICATE_PARAMETER,
                    &[&param.name, member_name],
                );
            }
            let resolved = self.table.resolve_type_ref(ctx, &param.ty, self.diagnostics);
            entries.push(FieldEntry {
                name: param.name.clone(),
                modifiers: param.modifiers,
                ty: self.table.type_text(&resolved, &param.ty),
                has_value: true,
                has_initializer: false,
                owner: FieldOwner::Method(owner),
                decl: param.id,
            });
        }
        entries
    }

    fn bind_throws(
        &mut self,
        ctx: &TypeContext<'_>,
        throws: &[TypeRef],
    ) -> SmallVec<[ThrowsEntry; 2]> {
        throws
            .iter()
            .map(|ty| {
                let resolved = self.table.resolve_type_ref(ctx, ty, self.diagnostics);
                ThrowsEntry {
                    name: self.table.type_text(&resolved, ty),
                    class: resolved.class(),
                }
            })
            .collect()
    }
}
