use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use jck_ast::CompilationUnit;
use jck_checker::CheckerOptions;
use jck_common::Diagnostic;

use crate::cli::args::CheckArgs;
use crate::cli::config::{
    CONFIG_FILE_NAME, JckConfig, find_config, load_config, resolve_checker_options,
};
use crate::program::{CheckResult, Program};

/// Result of one `jck check` run.
#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics discarded by `maxDiagnostics`.
    pub dropped: usize,
    pub files_read: Vec<PathBuf>,
}

impl CheckOutcome {
    #[must_use]
    pub fn has_internal_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_internal)
    }
}

/// A unit file holds one compilation unit or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum UnitFile {
    One(CompilationUnit),
    Many(Vec<CompilationUnit>),
}

pub fn run_check(args: &CheckArgs, cwd: &Path) -> Result<CheckOutcome> {
    let config_path = find_config(args.project.as_deref(), cwd);
    let config = match config_path.as_deref() {
        Some(path) => load_config(path)?,
        None => JckConfig::default(),
    };
    let base_dir = config_path
        .as_deref()
        .and_then(Path::parent)
        .map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);

    let options = apply_cli_overrides(
        resolve_checker_options(config.compiler_options.as_ref())?,
        args,
    );

    let inputs: Vec<PathBuf> = if args.files.is_empty() {
        config
            .files
            .iter()
            .flatten()
            .map(|file| base_dir.join(file))
            .collect()
    } else {
        args.files.iter().map(|file| cwd.join(file)).collect()
    };
    if inputs.is_empty() {
        bail!("no input files (pass unit files or set \"files\" in {CONFIG_FILE_NAME})");
    }

    let files = collect_unit_files(&inputs)?;
    let mut program = Program::new(options);
    for path in &files {
        for unit in load_units(path)? {
            program.add_unit(unit);
        }
    }
    debug!(files = files.len(), units = program.units().len(), "loaded units");

    let CheckResult { diagnostics, .. } = program.check();
    let dropped = diagnostics.dropped();
    Ok(CheckOutcome {
        diagnostics: diagnostics.into_vec(),
        dropped,
        files_read: files,
    })
}

pub fn apply_cli_overrides(mut options: CheckerOptions, args: &CheckArgs) -> CheckerOptions {
    if let Some(level) = args.language_level {
        options.language_level = level.into();
    }
    if args.no_unreachable {
        options.report_unreachable = false;
    }
    if let Some(limit) = args.max_diagnostics {
        options.max_diagnostics = limit;
    }
    options
}

/// Expand directories into their `*.json` unit files, skipping config files.
///
/// Files are returned sorted so unit order is stable across runs.
pub fn collect_unit_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input).into_iter().filter_map(Result::ok) {
                let path = entry.path();
                if entry.file_type().is_file() && is_unit_file(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("input not found: {}", input.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn is_unit_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
        && path.file_name().is_some_and(|name| name != CONFIG_FILE_NAME)
}

pub fn load_units(path: &Path) -> Result<Vec<CompilationUnit>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read unit file: {}", path.display()))?;
    let parsed: UnitFile = serde_json::from_str(&source)
        .with_context(|| format!("failed to parse unit file: {}", path.display()))?;
    Ok(match parsed {
        UnitFile::One(unit) => vec![unit],
        UnitFile::Many(units) => units,
    })
}
