//! Type-name resolution and accessibility.
//!
//! A simple name is looked up, in order, among the member types of the
//! current class and its enclosing classes (inherited member types
//! included), the single-type imports, the current package, the wildcard
//! imports, and finally `java.lang`. Dotted names are tried verbatim first,
//! then as `Outer.Inner` chains rooted at a simple name.

use jck_ast::{CompilationUnit, ImportDecl, TypeRef, Visibility};
use jck_common::diagnostics::diagnostic_codes;
use jck_common::limits::MAX_NESTING_DEPTH;
use jck_common::{Diagnostic, Diagnostics, NodeId};

use crate::names::simple_name;
use crate::symbols::ClassId;
use crate::table::SymbolTable;

/// Where a type reference appears.
#[derive(Clone, Copy, Debug)]
pub struct TypeContext<'c> {
    pub file: &'c str,
    pub package: &'c str,
    pub imports: &'c [ImportDecl],
    /// Class whose body (or header) contains the reference.
    pub class: Option<ClassId>,
}

impl<'c> TypeContext<'c> {
    #[must_use]
    pub fn for_unit(unit: &'c CompilationUnit, class: Option<ClassId>) -> Self {
        Self {
            file: &unit.file,
            package: unit.package_name(),
            imports: &unit.imports,
            class,
        }
    }

    #[must_use]
    pub fn access(&self) -> AccessContext<'c> {
        AccessContext {
            class: self.class,
            package: self.package,
        }
    }
}

/// The code asking for access.
#[derive(Clone, Copy, Debug)]
pub struct AccessContext<'c> {
    pub class: Option<ClassId>,
    pub package: &'c str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedType {
    /// A primitive type or `void`.
    Primitive(String),
    Class(ClassId),
    /// Resolution failed; a diagnostic has been recorded.
    Unknown,
}

impl ResolvedType {
    #[must_use]
    pub fn class(&self) -> Option<ClassId> {
        match self {
            ResolvedType::Class(id) => Some(*id),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, ResolvedType::Unknown)
    }
}

impl SymbolTable<'_> {
    // =========================================================================
    // Lookup
    // =========================================================================

    /// Resolve a type name without reporting anything.
    #[must_use]
    pub fn lookup_type_name(&self, ctx: &TypeContext<'_>, name: &str) -> Option<ClassId> {
        let Some((head, rest)) = name.split_once('.') else {
            return self.lookup_simple_type(ctx, name);
        };
        if let Some(id) = self.find_known(name) {
            return Some(id);
        }
        let base = self.lookup_simple_type(ctx, head)?;
        self.find_known(&format!("{}.{rest}", self.name_of(base)))
    }

    fn lookup_simple_type(&self, ctx: &TypeContext<'_>, name: &str) -> Option<ClassId> {
        if let Some(class) = ctx.class {
            for level in self.enclosing_chain(class) {
                if self.simple_name_of(level) == name {
                    return Some(level);
                }
                if let Some(id) = self.member_type(level, name) {
                    return Some(id);
                }
            }
        }

        for import in ctx.imports.iter().filter(|i| !i.wildcard) {
            if simple_name(&import.name) == name
                && let Some(id) = self.find_known(&import.name)
            {
                return Some(id);
            }
        }

        let same_package = if ctx.package.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", ctx.package)
        };
        if let Some(id) = self.find_known(&same_package) {
            return Some(id);
        }

        for import in ctx.imports.iter().filter(|i| i.wildcard) {
            if let Some(id) = self.find_known(&format!("{}.{name}", import.name)) {
                return Some(id);
            }
        }

        self.find_known(&format!("java.lang.{name}"))
    }

    /// Member type declared in `owner` or inherited from one of its ancestors.
    fn member_type(&self, owner: ClassId, name: &str) -> Option<ClassId> {
        std::iter::once(owner)
            .chain(self.ancestors(owner))
            .find_map(|c| self.find_known(&format!("{}.{name}", self.name_of(c))))
    }

    // =========================================================================
    // Resolution with diagnostics
    // =========================================================================

    /// Resolve a type as written in source.
    ///
    /// Unknown names are reported once per (node, name); inaccessible types
    /// are reported at the first enclosing level that blocks access.
    pub fn resolve_type_ref(
        &mut self,
        ctx: &TypeContext<'_>,
        ty: &TypeRef,
        diagnostics: &mut Diagnostics,
    ) -> ResolvedType {
        self.resolve_type_name(ctx, &ty.name, ty.id, diagnostics)
    }

    pub fn resolve_type_name(
        &mut self,
        ctx: &TypeContext<'_>,
        name: &str,
        anchor: NodeId,
        diagnostics: &mut Diagnostics,
    ) -> ResolvedType {
        if TypeRef::is_primitive_name(name) {
            return ResolvedType::Primitive(name.to_string());
        }
        let Some(id) = self.lookup_type_name(ctx, name) else {
            if self.first_unknown_report(anchor, name) {
                tracing::debug!(name, anchor = %anchor, "type not found");
                diagnostics.push(Diagnostic::from_code(
                    ctx.file.to_string(),
                    anchor,
                    diagnostic_codes::CANNOT_FIND_SYMBOL_CLASS,
                    &[name],
                ));
            }
            return ResolvedType::Unknown;
        };
        if let Err(level) = self.check_access(id, ctx.access()) {
            let from = match ctx.class {
                Some(class) => self.name_of(class).to_string(),
                None => ctx.file.to_string(),
            };
            diagnostics.push(Diagnostic::from_code(
                ctx.file.to_string(),
                anchor,
                diagnostic_codes::TYPE_NOT_ACCESSIBLE,
                &[self.name_of(level), from.as_str()],
            ));
            return ResolvedType::Unknown;
        }
        ResolvedType::Class(id)
    }

    /// Text stored in symbol entries: qualified when resolved, as written otherwise.
    #[must_use]
    pub fn type_text(&self, resolved: &ResolvedType, ty: &TypeRef) -> String {
        let mut text = match resolved {
            ResolvedType::Primitive(name) => name.clone(),
            ResolvedType::Class(id) => self.name_of(*id).to_string(),
            ResolvedType::Unknown => ty.name.clone(),
        };
        for _ in 0..ty.dims {
            text.push_str("[]");
        }
        text
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// Walk `target`'s enclosing chain innermost to outermost.
    ///
    /// Returns the first level that is not accessible from `from`. The walk
    /// stops after checking a library type.
    pub fn check_access(&self, target: ClassId, from: AccessContext<'_>) -> Result<(), ClassId> {
        let mut level = target;
        for _ in 0..MAX_NESTING_DEPTH {
            let visibility = self.modifiers_of(level).visibility();
            let owner = self.enclosing_of(level);
            if !self.visible_from(level, owner, visibility, from) {
                return Err(level);
            }
            if self.is_library(level) {
                return Ok(());
            }
            match owner {
                Some(outer) => level = outer,
                None => return Ok(()),
            }
        }
        Ok(())
    }

    /// Whether a member of `owner` with `visibility` can be used from `from`.
    #[must_use]
    pub fn is_member_accessible(
        &self,
        owner: ClassId,
        visibility: Visibility,
        from: AccessContext<'_>,
    ) -> bool {
        self.visible_from(owner, Some(owner), visibility, from)
    }

    fn visible_from(
        &self,
        declared: ClassId,
        owner: Option<ClassId>,
        visibility: Visibility,
        from: AccessContext<'_>,
    ) -> bool {
        match visibility {
            Visibility::Public => true,
            Visibility::Private => from
                .class
                .is_some_and(|class| self.top_level_of(class) == self.top_level_of(declared)),
            Visibility::Package => self.package_of_class(declared) == from.package,
            Visibility::Protected => {
                self.package_of_class(declared) == from.package
                    || match (owner, from.class) {
                        (Some(owner), Some(class)) => self
                            .enclosing_chain(class)
                            .into_iter()
                            .any(|c| self.is_subclass_of(c, owner)),
                        _ => false,
                    }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/resolve_tests.rs"]
mod tests;
