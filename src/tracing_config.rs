//! Tracing subscriber setup for the `jck` binary.
//!
//! Nothing is installed unless `JCK_LOG` or `RUST_LOG` is set.
//!
//! | Variable         | Values                  | Effect                                   |
//! |------------------|-------------------------|------------------------------------------|
//! | `JCK_LOG`        | `EnvFilter` directives  | Filter, takes precedence over `RUST_LOG` |
//! | `RUST_LOG`       | `EnvFilter` directives  | Fallback filter                          |
//! | `JCK_LOG_FORMAT` | `text`, `tree`, `json`  | Output layer (default `text`)            |
//!
//! ```bash
//! JCK_LOG=debug JCK_LOG_FORMAT=tree jck check units/
//! JCK_LOG="jck_binder=debug,jck_checker=trace" jck check a.json
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// Flat lines, one event per line.
    Text,
    /// Indented span tree (`tracing-tree`).
    Tree,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        std::env::var("JCK_LOG_FORMAT").map_or(Self::Text, |v| Self::parse(&v))
    }
}

fn build_filter() -> EnvFilter {
    let directives = std::env::var("JCK_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_default();
    EnvFilter::builder().parse_lossy(directives)
}

/// Install the global subscriber if logging was requested.
pub fn init_tracing() {
    if std::env::var_os("JCK_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Tree => {
            let layer = tracing_tree::HierarchicalLayer::default()
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_span_retrace(true)
                .with_targets(true);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Json => {
            let layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
