use jck_ast::CompilationUnit;
use jck_binder::{Binder, SymbolTable};
use jck_common::Diagnostics;

use crate::context::CheckerOptions;
use crate::oracle::DeclaredTypeOracle;
use crate::state::CheckerState;

/// Bind every unit, then check each one.
pub(crate) fn check_with<'a>(
    units: &'a [CompilationUnit],
    options: &CheckerOptions,
) -> (SymbolTable<'a>, Diagnostics) {
    let mut table = SymbolTable::with_java_lang();
    let mut diagnostics = Diagnostics::new("");
    Binder::new(&mut table, &mut diagnostics, options.language_level).bind_all(units);
    let oracle = DeclaredTypeOracle;
    let mut checker = CheckerState::new(&mut table, &mut diagnostics, options, &oracle);
    for unit in units {
        checker.check_unit(unit);
    }
    (table, diagnostics)
}

pub(crate) fn check(units: &[CompilationUnit]) -> (SymbolTable<'_>, Diagnostics) {
    check_with(units, &CheckerOptions::default())
}

pub(crate) fn codes(diagnostics: &Diagnostics) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}
