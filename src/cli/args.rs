use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use jck_binder::LanguageLevel;

/// CLI arguments for the jck binary.
#[derive(Parser, Debug)]
#[command(
    name = "jck",
    version,
    about = "Staged semantic checker for Java-like class bodies"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check JSON-serialized compilation units.
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Path to jck.json or a directory containing it.
    #[arg(short = 'p', long = "project")]
    pub project: Option<PathBuf>,

    /// Source language level.
    #[arg(
        long = "language-level",
        alias = "languageLevel",
        value_enum,
        ignore_case = true
    )]
    pub language_level: Option<Level>,

    /// Do not report statements that follow an abruptly completing statement.
    #[arg(long = "no-unreachable", alias = "noUnreachable")]
    pub no_unreachable: bool,

    /// Stop recording diagnostics after this many (0 = unlimited).
    #[arg(long = "max-diagnostics", alias = "maxDiagnostics")]
    pub max_diagnostics: Option<usize>,

    /// Colorize diagnostics. Defaults to on when stderr is a terminal.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub pretty: Option<bool>,

    /// Print diagnostics as a JSON array on stdout.
    #[arg(long)]
    pub json: bool,

    /// Unit files, or directories walked for `*.json` unit files.
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Level {
    #[value(alias = "7", alias = "1.7")]
    Java7,
    #[value(alias = "8", alias = "1.8")]
    Java8,
}

impl From<Level> for LanguageLevel {
    fn from(value: Level) -> Self {
        match value {
            Level::Java7 => LanguageLevel::Java7,
            Level::Java8 => LanguageLevel::Java8,
        }
    }
}
