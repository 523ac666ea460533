use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source language level. Governs which members an interface body may declare.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageLevel {
    Java7,
    #[default]
    Java8,
}

impl LanguageLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageLevel::Java7 => "java7",
            LanguageLevel::Java8 => "java8",
        }
    }

    /// Interfaces may carry `default` and `static` method bodies.
    #[must_use]
    pub const fn allows_interface_method_bodies(self) -> bool {
        matches!(self, LanguageLevel::Java8)
    }
}

impl fmt::Display for LanguageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java7" | "7" | "1.7" => Ok(LanguageLevel::Java7),
            "java8" | "8" | "1.8" => Ok(LanguageLevel::Java8),
            other => Err(format!("unknown language level '{other}' (expected java7 or java8)")),
        }
    }
}
