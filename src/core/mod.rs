use std::{
    fmt, io,
    path::{Path, PathBuf},
    result,
};

use thiserror::Error;

use crate::ca_ignore::CaIgnoreError;

/// Error types for the wsec engine.
///
/// Covers everything outside of user-input validation: reading and writing
/// configuration and profile files, parsing TOML, and the CA-ignore side store.
#[derive(Error, Debug)]
pub enum WsecError {
    /// Configuration validation error
    #[error("configuration validation failed for '{component}': {details}")]
    ConfigValidation {
        /// Component that failed validation
        component: String,
        /// Validation error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    IoError {
        /// Path where I/O error occurred
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Standard I/O operation error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParseError {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// TOML serialization error
    #[error("failed to serialize {what} to TOML: {details}")]
    TomlSerializeError {
        /// What was being serialized
        what: String,
        /// Serialization error details
        details: String,
    },

    /// CA-ignore store failure
    #[error(transparent)]
    CaIgnore(#[from] CaIgnoreError),
}

/// A specialized `Result` type for wsec operations.
pub type Result<T> = result::Result<T, WsecError>;

impl WsecError {
    /// Creates a TOML parsing error with optional file path context.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying parsing error
    /// * `path` - Optional path to the file that failed to parse
    pub fn toml_parse(error: impl fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => {
                let clean_path = p.canonicalize().unwrap_or_else(|_| p.to_path_buf());
                clean_path.to_string_lossy().to_string()
            }
            None => "string".to_string(),
        };

        WsecError::TomlParseError {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error carrying the path it happened on.
    pub fn io(error: impl fmt::Display, path: &Path) -> Self {
        WsecError::IoError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
