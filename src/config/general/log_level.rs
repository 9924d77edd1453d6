use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default verbosity when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Failures only.
    Error,

    /// Warnings such as a certificate that could not be written.
    Warn,

    /// Persistence and configuration events.
    #[default]
    Info,

    /// Method switches and detection decisions.
    Debug,

    /// Everything, including span entry and exit.
    Trace,
}

impl LogLevel {
    /// Filter directive for this level, scoped to the engine's own targets.
    pub fn directive(self) -> String {
        format!("wsec={self}")
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
