use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

use jck_binder::LanguageLevel;
use jck_checker::CheckerOptions;

pub const CONFIG_FILE_NAME: &str = "jck.json";

/// Accept `true`/`false` as well as their string spellings.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct JckConfig {
    #[serde(default)]
    pub compiler_options: Option<CompilerOptions>,
    /// Unit files or directories, relative to the config file.
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub language_level: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub report_unreachable: Option<bool>,
    #[serde(default)]
    pub max_diagnostics: Option<usize>,
}

pub fn parse_config(source: &str) -> Result<JckConfig> {
    serde_json::from_str(source).context("failed to parse jck.json")
}

pub fn load_config(path: &Path) -> Result<JckConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config(&source).with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Resolve `-p` (a file or a directory) or look for `jck.json` in `cwd`.
pub fn find_config(project: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    match project {
        Some(path) => {
            let path = if path.is_absolute() {
                path.to_path_buf()
            } else {
                cwd.join(path)
            };
            if path.is_dir() {
                Some(path.join(CONFIG_FILE_NAME))
            } else {
                Some(path)
            }
        }
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            candidate.is_file().then_some(candidate)
        }
    }
}

pub fn resolve_checker_options(options: Option<&CompilerOptions>) -> Result<CheckerOptions> {
    let mut resolved = CheckerOptions::default();
    let Some(options) = options else {
        return Ok(resolved);
    };

    if let Some(level) = options.language_level.as_deref() {
        resolved.language_level = level
            .parse::<LanguageLevel>()
            .map_err(|err| anyhow!("unsupported compilerOptions.languageLevel: {err}"))?;
    }
    if let Some(report) = options.report_unreachable {
        resolved.report_unreachable = report;
    }
    if let Some(limit) = options.max_diagnostics {
        resolved.max_diagnostics = limit;
    }

    Ok(resolved)
}
