//! Name helpers shared by both passes.
//!
//! Two type names are *equivalent* when their texts are equal or their
//! unqualified forms are equal (`java.lang.String` ~ `String`). Signature
//! matching between declarations and registered entries relies on this.

use crate::symbols::{ClassEntry, MethodEntry};

/// Last dotted segment of a name: `a.b.C` -> `C`.
#[must_use]
pub fn simple_name(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Everything before the last dot; the empty string for unqualified names.
#[must_use]
pub fn package_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[..pos],
        None => "",
    }
}

#[must_use]
pub fn names_equivalent(a: &str, b: &str) -> bool {
    a == b || simple_name(a) == simple_name(b)
}

/// Position-by-position equivalence of two parameter type lists.
#[must_use]
pub fn params_match<A, B>(declared: &[A], registered: &[B]) -> bool
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    declared.len() == registered.len()
        && declared
            .iter()
            .zip(registered)
            .all(|(a, b)| names_equivalent(a.as_ref(), b.as_ref()))
}

/// Find the registered entry a body declaration corresponds to.
///
/// Candidates are filtered by exact name (constructors by the class's simple
/// name), then by parameter list. The first match wins.
#[must_use]
pub fn find_registered(
    class: &ClassEntry,
    name: &str,
    is_constructor: bool,
    param_types: &[String],
) -> Option<usize> {
    class.methods.iter().position(|method| {
        method.is_constructor == is_constructor
            && signature_name_matches(class, method, name)
            && params_match(param_types, &method.param_types())
    })
}

fn signature_name_matches(class: &ClassEntry, method: &MethodEntry, name: &str) -> bool {
    if method.is_constructor {
        simple_name(name) == class.simple_name
    } else {
        method.name == name
    }
}

/// `m(int, String)` rendering used in diagnostics.
#[must_use]
pub fn signature_text<S: AsRef<str>>(name: &str, param_types: &[S]) -> String {
    let params: Vec<&str> = param_types
        .iter()
        .map(|p| simple_name(p.as_ref()))
        .collect();
    format!("{name}({})", params.join(", "))
}
