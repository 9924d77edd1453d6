use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, instrument};

use super::{ConfigPaths, EngineConfig};
use crate::{Result, WsecError};

impl EngineConfig {
    /// Loads the configuration from `path`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The TOML content is invalid
    /// - A value has the wrong type or an unknown variant
    #[instrument]
    pub fn load(path: &Path) -> Result<EngineConfig> {
        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(EngineConfig::default());
        }

        let content = fs::read_to_string(path).map_err(|e| WsecError::io(e, path))?;
        let value: toml::Value =
            toml::from_str(&content).map_err(|e| WsecError::toml_parse(e, Some(path)))?;
        let config: EngineConfig =
            value
                .try_into()
                .map_err(|e: toml::de::Error| WsecError::ConfigValidation {
                    component: "config parsing".to_string(),
                    details: format!("Configuration validation failed: {e}"),
                })?;

        info!(
            new_connection_policy = %config.secrets.new_connection_policy,
            "loaded configuration"
        );
        Ok(config)
    }

    /// Loads the configuration from the standard location.
    ///
    /// # Errors
    /// Returns error if the location cannot be resolved or the file is invalid.
    pub fn load_default() -> Result<EngineConfig> {
        let path = ConfigPaths::main_config()?;
        Self::load(&path)
    }

    /// Path of the CA-ignore side table, configured or default.
    ///
    /// # Errors
    /// Returns error if no path is configured and the config directory cannot
    /// be resolved.
    pub fn ca_ignore_path(&self) -> Result<PathBuf> {
        match &self.ca_ignore.path {
            Some(path) => Ok(path.clone()),
            None => Ok(ConfigPaths::ca_ignore_file()?),
        }
    }

    /// Renders the JSON Schema of the configuration.
    ///
    /// # Errors
    /// Returns error if the schema cannot be serialized.
    pub fn json_schema() -> Result<String> {
        let schema = schemars::schema_for!(EngineConfig);
        serde_json::to_string_pretty(&schema).map_err(|e| WsecError::ConfigValidation {
            component: "schema".to_string(),
            details: e.to_string(),
        })
    }
}
