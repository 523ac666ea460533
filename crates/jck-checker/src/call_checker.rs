//! Method and constructor resolution.
//!
//! Candidates are picked by arity and argument compatibility against the
//! oracle's argument types. The first applicable candidate wins; unknown
//! argument types are accepted so a weak oracle never causes errors.

use jck_ast::{CallExpr, NewExpr, TypeRef};
use jck_binder::library::{OBJECT, boxed_name, unboxed_name};
use jck_binder::{ClassId, FieldEntry, MethodId, names_equivalent, params_match, signature_text};
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;
use smallvec::SmallVec;
use tracing::trace;

use crate::oracle::ExprType;
use crate::state::CheckerState;

/// Primitive widening conversions, source to allowed targets.
const WIDENING: &[(&str, &[&str])] = &[
    ("byte", &["short", "int", "long", "float", "double"]),
    ("short", &["int", "long", "float", "double"]),
    ("char", &["int", "long", "float", "double"]),
    ("int", &["long", "float", "double"]),
    ("long", &["float", "double"]),
    ("float", &["double"]),
];

fn widens_to(from: &str, to: &str) -> bool {
    WIDENING
        .iter()
        .find(|(source, _)| *source == from)
        .is_some_and(|(_, targets)| targets.contains(&to))
}

fn is_primitive(name: &str) -> bool {
    TypeRef::is_primitive_name(name)
}

fn arg_list(args: &[ExprType]) -> String {
    args.iter().map(ExprType::display).collect::<Vec<_>>().join(", ")
}

impl<'a> CheckerState<'_, 'a> {
    pub(crate) fn arg_types(&self, args: &[jck_ast::Expr]) -> Vec<ExprType> {
        args.iter().map(|arg| self.type_of(arg)).collect()
    }

    // =========================================================================
    // Compatibility
    // =========================================================================

    pub(crate) fn is_assignable(&self, arg: &ExprType, target: &str) -> bool {
        match arg {
            ExprType::Unknown => true,
            ExprType::Void => false,
            ExprType::Null => !is_primitive(target),
            ExprType::Known(source) => self.is_convertible(source, target),
        }
    }

    fn is_convertible(&self, source: &str, target: &str) -> bool {
        if names_equivalent(source, target) {
            return true;
        }
        match (is_primitive(source), is_primitive(target)) {
            (true, true) => widens_to(source, target),
            (true, false) => boxed_name(source)
                .is_some_and(|boxed| self.is_convertible(boxed, target)),
            (false, true) => unboxed_name(source)
                .is_some_and(|unboxed| unboxed == target || widens_to(unboxed, target)),
            (false, false) => self.is_reference_convertible(source, target),
        }
    }

    fn is_reference_convertible(&self, source: &str, target: &str) -> bool {
        if names_equivalent(target, OBJECT) {
            return true;
        }
        match (source.strip_suffix("[]"), target.strip_suffix("[]")) {
            (Some(source), Some(target)) => {
                if is_primitive(source) || is_primitive(target) {
                    return source == target;
                }
                return self.is_reference_convertible(source, target);
            }
            (Some(_), None) | (None, Some(_)) => return false,
            (None, None) => {}
        }
        let (Some(source), Some(target)) = (self.class_named(source), self.class_named(target)) else {
            return true;
        };
        if self.table.is_subclass_of(source, target) {
            return true;
        }
        // An unresolved ancestor could still be a subtype of the target.
        self.table
            .ancestors(source)
            .into_iter()
            .chain([source, target])
            .any(|c| self.table.is_continuation(c))
    }

    fn class_named(&self, name: &str) -> Option<ClassId> {
        self.table
            .find(name)
            .or_else(|| self.table.lookup_type_name(&self.type_context(), name))
    }

    fn is_applicable(&self, params: &[FieldEntry], args: &[ExprType]) -> bool {
        params.len() == args.len()
            && params
                .iter()
                .zip(args)
                .all(|(param, arg)| self.is_assignable(arg, &param.ty))
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// First constructor of `class` applicable to `args`, without reporting.
    pub(crate) fn applicable_constructor(&self, class: ClassId, args: &[ExprType]) -> Option<MethodId> {
        self.table
            .entry(class)?
            .constructors()
            .find(|(_, ctor)| self.is_applicable(&ctor.params, args))
            .map(|(mid, _)| mid)
    }

    /// Resolve a constructor invocation, reporting a missing or
    /// inaccessible constructor at `anchor`.
    pub(crate) fn resolve_constructor(
        &mut self,
        class: ClassId,
        args: &[ExprType],
        anchor: NodeId,
    ) -> Option<MethodId> {
        let entry = self.table.entry(class)?;
        let class_name = entry.simple_name.clone();
        if entry.constructors().next().is_none() {
            return None;
        }
        let Some(mid) = self.applicable_constructor(class, args) else {
            let list = arg_list(args);
            self.report(anchor, diagnostic_codes::NO_SUITABLE_CONSTRUCTOR, &[&class_name, &list]);
            return None;
        };
        self.check_member_access(class, mid, anchor);
        Some(mid)
    }

    pub(crate) fn check_new(&mut self, new: &'a NewExpr) {
        for arg in &new.args {
            self.check_expr(arg);
        }
        let Some(class) = self.resolve_class(&new.ty) else {
            return;
        };
        let Some(entry) = self.table.entry(class) else {
            return;
        };
        if entry.is_abstract() {
            let name = entry.simple_name.clone();
            self.report(new.id, diagnostic_codes::ABSTRACT_INSTANTIATION, &[&name]);
            return;
        }
        let args = self.arg_types(&new.args);
        self.resolve_constructor(class, &args, new.id);
    }

    fn check_member_access(&mut self, owner: ClassId, mid: MethodId, anchor: NodeId) {
        let Some(method) = self.table.method(mid) else {
            return;
        };
        let visibility = method.visibility();
        let access = self.type_context().access();
        if self.table.is_member_accessible(owner, visibility, access) {
            return;
        }
        let signature = method.signature();
        let owner_name = self.table.simple_name_of(owner).to_string();
        self.report(
            anchor,
            diagnostic_codes::MEMBER_NOT_ACCESSIBLE,
            &[&signature, visibility.as_str(), &owner_name],
        );
    }

    // =========================================================================
    // Methods
    // =========================================================================

    pub(crate) fn check_call(&mut self, call: &'a CallExpr) {
        let qualified = call.target.is_some();
        if let Some(target) = &call.target {
            self.check_receiver(target);
        }
        for arg in &call.args {
            self.check_expr(arg);
        }
        if !qualified {
            let args = self.arg_types(&call.args);
            self.resolve_unqualified_call(call, &args);
        }
    }

    /// Methods named `name` visible in `class`: its own, then inherited ones
    /// not hidden by an already collected signature.
    fn methods_in_hierarchy(&self, class: ClassId, name: &str) -> SmallVec<[(ClassId, MethodId); 4]> {
        let mut found: SmallVec<[(ClassId, MethodId); 4]> = SmallVec::new();
        for owner in std::iter::once(class).chain(self.table.ancestors(class)) {
            let Some(entry) = self.table.entry(owner) else {
                continue;
            };
            for (mid, method) in entry.methods_named(name) {
                let hidden = found.iter().any(|(_, seen)| {
                    self.table
                        .method(*seen)
                        .is_some_and(|m| params_match(m.param_types().as_slice(), method.param_types().as_slice()))
                });
                if !hidden {
                    found.push((owner, mid));
                }
            }
        }
        found
    }

    /// Whether `class` has ancestors whose members are not fully modelled.
    fn has_open_hierarchy(&self, class: ClassId) -> bool {
        std::iter::once(class)
            .chain(self.table.ancestors(class))
            .any(|c| {
                self.table.is_continuation(c)
                    || (self.table.is_library(c) && self.table.name_of(c) != OBJECT)
            })
    }

    /// Search the class and its ancestors, then each enclosing class. The
    /// first class that has a method of that name decides.
    fn resolve_unqualified_call(&mut self, call: &CallExpr, args: &[ExprType]) {
        let Some(class) = self.class else {
            return;
        };
        let chain = self.table.enclosing_chain(class);
        let candidates = chain
            .iter()
            .map(|c| self.methods_in_hierarchy(*c, &call.name))
            .find(|found| !found.is_empty());

        let Some(candidates) = candidates else {
            if chain.iter().any(|c| self.has_open_hierarchy(*c)) {
                trace!(name = %call.name, "method not modelled; skipped");
                return;
            }
            let displays: Vec<&str> = args.iter().map(ExprType::display).collect();
            let signature = signature_text(&call.name, &displays);
            self.report(call.id, diagnostic_codes::CANNOT_FIND_SYMBOL_METHOD, &[&signature]);
            return;
        };

        let applicable = candidates.iter().copied().find(|(_, mid)| {
            self.table
                .method(*mid)
                .is_some_and(|m| self.is_applicable(&m.params, args))
        });
        match applicable {
            Some((owner, mid)) => self.check_member_access(owner, mid, call.id),
            None => {
                let owner = candidates[0].0;
                let owner_name = self.table.simple_name_of(owner).to_string();
                let list = arg_list(args);
                self.report(
                    call.id,
                    diagnostic_codes::METHOD_NOT_APPLICABLE,
                    &[&call.name, &owner_name, &list],
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/call_tests.rs"]
mod tests;
