//! CA-certificate ignore side table.
//!
//! The profile format has no field saying "the user chose not to check the
//! server's CA". This table keeps that decision per connection UUID, for the
//! outer and the inner phase, and persists it outside the profile.

mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use store::{CaIgnoreEntry, CaIgnoreStore};

/// Failures of the persisted side table.
#[derive(Error, Debug)]
pub enum CaIgnoreError {
    /// Backing file exists but could not be read
    #[error("failed to read CA-ignore store '{path}': {details}")]
    ReadFailed {
        /// Backing file
        path: PathBuf,
        /// I/O error details
        details: String,
    },

    /// Backing file could not be written
    #[error("failed to write CA-ignore store '{path}': {details}")]
    WriteFailed {
        /// Backing file
        path: PathBuf,
        /// I/O or serialization error details
        details: String,
    },

    /// Backing file is not valid TOML for this store
    #[error("invalid CA-ignore store '{path}': {details}")]
    InvalidFormat {
        /// Backing file
        path: PathBuf,
        /// Parse error details
        details: String,
    },
}
