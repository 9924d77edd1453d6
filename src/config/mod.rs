//! Engine configuration.
//!
//! Defines the settings the engine reads at startup: logging, the storage
//! policy handed to secrets of new connections, and where the CA-ignore side
//! table lives. All sections are optional in TOML and fall back to defaults.

mod general;
mod loading;
mod paths;
mod secrets;

pub use general::{GeneralConfig, LogLevel};
pub use paths::ConfigPaths;
pub use secrets::SecretsConfig;

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main configuration structure for wsec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct EngineConfig {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Defaults for secret fields.
    #[serde(default)]
    pub secrets: SecretsConfig,

    /// CA-ignore side table location.
    #[serde(default)]
    pub ca_ignore: CaIgnoreConfig,
}

/// Where the CA-ignore side table is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CaIgnoreConfig {
    /// Table file. Defaults to `ca-ignore.toml` in the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests;
