//! Multi-unit driver: structural pass over every unit, then the checking pass.

use jck_ast::CompilationUnit;
use jck_binder::{Binder, SymbolTable};
use jck_checker::{CheckerOptions, CheckerState, DeclaredTypeOracle, TypeOracle};
use jck_common::{Diagnostic, Diagnostics};
use tracing::debug;

/// A set of compilation units checked together.
///
/// Units may reference each other's types in any order; declarations of all
/// units are registered before any of them is bound.
#[derive(Debug, Default)]
pub struct Program {
    units: Vec<CompilationUnit>,
    options: CheckerOptions,
}

/// Output of `Program::check`: the populated symbol table and every diagnostic.
pub struct CheckResult<'p> {
    pub table: SymbolTable<'p>,
    pub diagnostics: Diagnostics,
}

impl CheckResult<'_> {
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

impl Program {
    #[must_use]
    pub fn new(options: CheckerOptions) -> Self {
        Self {
            units: Vec::new(),
            options,
        }
    }

    pub fn add_unit(&mut self, unit: CompilationUnit) {
        self.units.push(unit);
    }

    #[must_use]
    pub fn with_units(mut self, units: impl IntoIterator<Item = CompilationUnit>) -> Self {
        self.units.extend(units);
        self
    }

    #[must_use]
    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    #[must_use]
    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Check with the declared-type oracle.
    #[must_use]
    pub fn check(&self) -> CheckResult<'_> {
        self.check_with_oracle(&DeclaredTypeOracle)
    }

    /// Run both passes over every unit, typing expressions through `oracle`.
    #[tracing::instrument(level = "debug", skip_all, fields(units = self.units.len()))]
    pub fn check_with_oracle(&self, oracle: &dyn TypeOracle) -> CheckResult<'_> {
        let mut table = SymbolTable::with_java_lang();
        let mut diagnostics = Diagnostics::new("").with_limit(self.options.max_diagnostics);

        Binder::new(&mut table, &mut diagnostics, self.options.language_level)
            .bind_all(&self.units);
        debug!(classes = table.len(), diagnostics = diagnostics.len(), "structural pass done");

        let mut checker = CheckerState::new(&mut table, &mut diagnostics, &self.options, oracle);
        for unit in &self.units {
            checker.check_unit(unit);
        }
        debug!(diagnostics = diagnostics.len(), "checking pass done");

        CheckResult { table, diagnostics }
    }
}
