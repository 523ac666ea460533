use jck_binder::LanguageLevel;
use jck_common::limits::DEFAULT_MAX_DIAGNOSTICS;

/// Options that govern both passes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckerOptions {
    pub language_level: LanguageLevel,
    /// Report statements that follow an abruptly completing statement.
    pub report_unreachable: bool,
    /// Stop storing diagnostics after this many (0 = unlimited).
    pub max_diagnostics: usize,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            language_level: LanguageLevel::default(),
            report_unreachable: true,
            max_diagnostics: DEFAULT_MAX_DIAGNOSTICS,
        }
    }
}
