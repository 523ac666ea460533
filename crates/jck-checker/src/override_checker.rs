//! Override compatibility between a class's methods and its ancestors'.

use jck_ast::Visibility;
use jck_binder::{ClassId, MethodEntry, names_equivalent, params_match};
use jck_common::NodeId;
use jck_common::diagnostics::diagnostic_codes;

use crate::state::CheckerState;

/// The first rule an overriding method breaks, with its extra message argument.
fn override_violation(method: &MethodEntry, overridden: &MethodEntry) -> Option<(u32, Option<&'static str>)> {
    let returns_match = match (&method.return_type, &overridden.return_type) {
        (Some(a), Some(b)) => names_equivalent(a, b),
        _ => true,
    };
    if !returns_match {
        return Some((diagnostic_codes::OVERRIDE_RETURN_TYPE, None));
    }
    if method.is_static() != overridden.is_static() {
        let which = if method.is_static() { "overriding" } else { "overridden" };
        return Some((diagnostic_codes::OVERRIDE_STATIC_MISMATCH, Some(which)));
    }
    if overridden.is_final() {
        return Some((diagnostic_codes::OVERRIDE_FINAL, None));
    }
    if method.visibility() < overridden.visibility() {
        return Some((
            diagnostic_codes::OVERRIDE_WEAKER_ACCESS,
            Some(overridden.visibility().as_str()),
        ));
    }
    None
}

impl CheckerState<'_, '_> {
    /// Check every declared method of `class` against the nearest ancestor
    /// method with the same name and parameter list. At most one diagnostic
    /// is reported per method.
    pub(crate) fn check_overrides(&mut self, class: ClassId) {
        let Some(entry) = self.table.entry(class) else {
            return;
        };
        let ancestors = self.table.ancestors(class);
        let class_name = entry.simple_name.clone();

        let mut found: Vec<(NodeId, u32, Vec<String>)> = Vec::new();
        for method in &entry.methods {
            if method.is_constructor || method.synthetic || method.visibility() == Visibility::Private {
                continue;
            }
            let params = method.param_types();
            let overridden = ancestors.iter().find_map(|ancestor| {
                let owner = self.table.entry(*ancestor)?;
                owner
                    .methods_named(&method.name)
                    .find(|(_, m)| {
                        m.visibility() != Visibility::Private
                            && params_match(params.as_slice(), m.param_types().as_slice())
                    })
                    .map(|(_, m)| (owner.simple_name.as_str(), m))
            });
            let Some((owner_name, overridden)) = overridden else {
                continue;
            };
            if let Some((code, extra)) = override_violation(method, overridden) {
                tracing::debug!(method = %method.name, owner = owner_name, code, "override violation");
                let mut args = vec![method.name.clone(), class_name.clone(), owner_name.to_string()];
                args.extend(extra.map(str::to_string));
                found.push((method.decl, code, args));
            }
        }

        for (anchor, code, args) in found {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            self.report(anchor, code, &args);
        }
    }
}

#[cfg(test)]
#[path = "../tests/override_tests.rs"]
mod tests;
