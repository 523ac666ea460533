//! The structural pass.
//!
//! `Binder` turns declarations into symbol entries. Resolution is driven by
//! demand: binding one class resolves its supertypes first, whichever unit
//! they are declared in. A class is promoted to a `Resolved` header before
//! its supertypes and members are linked, so references back to it during
//! its own resolution see a valid (partially filled) entry.

use jck_ast::{CompilationUnit, TypeDecl, TypeKind};
use jck_common::diagnostics::diagnostic_codes;
use jck_common::{Diagnostic, Diagnostics, NodeId};
use tracing::debug;

use crate::library::OBJECT;
use crate::options::LanguageLevel;
use crate::resolve::{ResolvedType, TypeContext};
use crate::symbols::{ClassEntry, ClassId};
use crate::table::{ClassSlot, DeclSite, SymbolTable};

pub struct Binder<'t, 'a> {
    pub(crate) table: &'t mut SymbolTable<'a>,
    pub(crate) diagnostics: &'t mut Diagnostics,
    pub(crate) language_level: LanguageLevel,
}

impl<'t, 'a> Binder<'t, 'a> {
    pub fn new(
        table: &'t mut SymbolTable<'a>,
        diagnostics: &'t mut Diagnostics,
        language_level: LanguageLevel,
    ) -> Self {
        Self {
            table,
            diagnostics,
            language_level,
        }
    }

    /// Declare and bind every unit.
    pub fn bind_all(&mut self, units: &'a [CompilationUnit]) {
        for unit in units {
            self.declare_unit(unit);
        }
        for unit in units {
            self.bind_unit(unit);
        }
    }

    /// Make a unit's types known to the table without building them.
    pub fn declare_unit(&mut self, unit: &'a CompilationUnit) {
        for (decl, name) in self.table.declare_unit(unit) {
            self.report(&unit.file, decl.id, diagnostic_codes::DUPLICATE_CLASS, &[&name]);
        }
    }

    /// Resolve every type declared in `unit`, enclosing types first.
    pub fn bind_unit(&mut self, unit: &'a CompilationUnit) {
        debug!(file = %unit.file, types = unit.types.len(), "binding unit");
        for decl in &unit.types {
            self.bind_decl(decl);
        }
    }

    fn bind_decl(&mut self, decl: &'a TypeDecl) {
        if let Some(id) = self.table.class_for_decl(decl.id) {
            self.resolve(id);
        }
        for nested in decl.nested_types() {
            self.bind_decl(nested);
        }
    }

    /// Promote a continuation to a resolved entry. Idempotent.
    ///
    /// Slots nothing declares stay continuations.
    pub fn resolve(&mut self, id: ClassId) -> ClassId {
        let Some(site) = self.pending_site(id) else {
            return id;
        };
        if let Some(outer) = site.enclosing {
            self.resolve(outer);
            if self.pending_site(id).is_none() {
                return id;
            }
        }
        self.build(id, site);
        id
    }

    fn pending_site(&self, id: ClassId) -> Option<DeclSite<'a>> {
        match self.table.slot(id) {
            Some(ClassSlot::Unresolved {
                decl: Some(site), ..
            }) => Some(*site),
            _ => None,
        }
    }

    #[tracing::instrument(level = "debug", skip(self, site), fields(class = %site.decl.name))]
    fn build(&mut self, id: ClassId, site: DeclSite<'a>) {
        let name = self.table.name_of(id).to_string();
        let mut header = ClassEntry::new(
            id,
            &name,
            site.decl.kind,
            self.table.normalized_type_modifiers(site),
        );
        header.package = site.unit.package_name().to_string();
        header.enclosing = site.enclosing;
        header.decl = site.decl.id;
        header.file.clone_from(&site.unit.file);
        self.table.promote(header);

        self.link_supertypes(id, site);
        self.register_nested(id, site);
        self.bind_members(id, site);
        debug!(class = %name, "class resolved");
    }

    // =========================================================================
    // Supertypes
    // =========================================================================

    fn link_supertypes(&mut self, id: ClassId, site: DeclSite<'a>) {
        let ctx = TypeContext::for_unit(site.unit, site.enclosing);
        let decl = site.decl;

        if decl.kind == TypeKind::Class {
            let superclass = match &decl.extends {
                Some(ext) => self
                    .resolve_supertype(id, &ctx, &ext.name, ext.id)
                    .filter(|&sup| self.check_superclass(site, sup, ext.id)),
                None if self.table.name_of(id) != OBJECT => self.table.find_known(OBJECT),
                None => None,
            };
            if let Some(entry) = self.table.entry_mut(id) {
                entry.superclass = superclass;
            }
        }

        for iface in &decl.interfaces {
            let Some(sup) = self.resolve_supertype(id, &ctx, &iface.name, iface.id) else {
                continue;
            };
            if self.table.kind_of(sup) != Some(TypeKind::Interface) {
                let name = self.table.name_of(sup).to_string();
                self.report(
                    &site.unit.file,
                    iface.id,
                    diagnostic_codes::INTERFACE_EXPECTED,
                    &[&name],
                );
                continue;
            }
            if let Some(entry) = self.table.entry_mut(id)
                && !entry.interfaces.contains(&sup)
            {
                entry.interfaces.push(sup);
            }
        }
    }

    /// Resolve a supertype name and drop links that would close a cycle.
    fn resolve_supertype(
        &mut self,
        id: ClassId,
        ctx: &TypeContext<'_>,
        name: &str,
        anchor: NodeId,
    ) -> Option<ClassId> {
        let sup = match self
            .table
            .resolve_type_name(ctx, name, anchor, self.diagnostics)
        {
            ResolvedType::Class(sup) => sup,
            ResolvedType::Primitive(_) => {
                self.report(ctx.file, anchor, diagnostic_codes::CANNOT_FIND_SYMBOL_CLASS, &[name]);
                return None;
            }
            ResolvedType::Unknown => return None,
        };
        self.resolve(sup);
        if sup == id || self.table.ancestors(sup).contains(&id) {
            let name = self.table.name_of(id).to_string();
            debug!(class = %name, "cyclic inheritance");
            self.report(ctx.file, anchor, diagnostic_codes::CYCLIC_INHERITANCE, &[&name]);
            return None;
        }
        Some(sup)
    }

    fn check_superclass(&mut self, site: DeclSite<'a>, sup: ClassId, anchor: NodeId) -> bool {
        let name = self.table.name_of(sup).to_string();
        if self.table.kind_of(sup) == Some(TypeKind::Interface) {
            self.report(
                &site.unit.file,
                anchor,
                diagnostic_codes::NO_INTERFACE_EXPECTED,
                &[&name],
            );
            return false;
        }
        if self.table.modifiers_of(sup).is_final() {
            self.report(
                &site.unit.file,
                anchor,
                diagnostic_codes::CANNOT_INHERIT_FROM_FINAL,
                &[&name],
            );
        }
        true
    }

    fn register_nested(&mut self, id: ClassId, site: DeclSite<'a>) {
        let nested: Vec<(String, ClassId)> = site
            .decl
            .nested_types()
            .filter_map(|decl| {
                self.table
                    .class_for_decl(decl.id)
                    .map(|nested| (decl.name.clone(), nested))
            })
            .collect();
        if let Some(entry) = self.table.entry_mut(id) {
            entry.nested.extend(nested);
        }
    }

    pub(crate) fn report(&mut self, file: &str, anchor: NodeId, code: u32, args: &[&str]) {
        self.diagnostics
            .push(Diagnostic::from_code(file.to_string(), anchor, code, args));
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod tests;
