use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::CaIgnoreError;

/// Per-connection CA-check opt-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CaIgnoreEntry {
    /// The outer CA certificate is deliberately left out.
    #[serde(default)]
    pub ignore_ca_cert: bool,
    /// The inner CA certificate is deliberately left out.
    #[serde(default)]
    pub ignore_phase2_ca_cert: bool,
}

impl CaIgnoreEntry {
    fn get(&self, phase2: bool) -> bool {
        if phase2 {
            self.ignore_phase2_ca_cert
        } else {
            self.ignore_ca_cert
        }
    }

    fn set(&mut self, phase2: bool, ignored: bool) {
        if phase2 {
            self.ignore_phase2_ca_cert = ignored;
        } else {
            self.ignore_ca_cert = ignored;
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct CaIgnoreFile {
    #[serde(default)]
    connections: BTreeMap<String, CaIgnoreEntry>,
}

/// Side table recording which connections opted out of CA certificate checks.
///
/// Cloning is cheap and every clone sees the same rows. All access goes
/// through a single lock, which also serialises writes to the backing file.
#[derive(Debug, Clone)]
pub struct CaIgnoreStore {
    entries: Arc<RwLock<BTreeMap<String, CaIgnoreEntry>>>,
    path: Option<PathBuf>,
}

impl CaIgnoreStore {
    /// Store without a backing file. `persist` and `load` are no-ops.
    pub fn in_memory() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            path: None,
        }
    }

    /// Opens a store backed by the TOML file at `path`, reading any rows it holds.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    #[instrument]
    pub fn open(path: &Path) -> Result<Self, CaIgnoreError> {
        let file = read_file(path)?;
        info!(rows = file.connections.len(), "opened CA-ignore store");
        Ok(Self {
            entries: Arc::new(RwLock::new(file.connections)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether `uuid` opted out of CA checks for the outer or inner phase.
    pub fn get_ignore(&self, uuid: &str, phase2: bool) -> bool {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(uuid).is_some_and(|entry| entry.get(phase2))
    }

    /// Records the opt-out for `uuid` in memory, creating its row if needed.
    pub fn set_ignore(&self, uuid: &str, phase2: bool, ignored: bool) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(uuid.to_string())
            .or_default()
            .set(phase2, ignored);
        debug!(uuid, phase2, ignored, "CA-ignore updated");
    }

    /// Current row for `uuid`.
    pub fn entry(&self, uuid: &str) -> Option<CaIgnoreEntry> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(uuid).copied()
    }

    /// Writes the in-memory row for `uuid` to the backing file.
    ///
    /// Rows of other connections already in the file are preserved.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed or written.
    #[instrument(skip(self))]
    pub fn persist(&self, uuid: &str) -> Result<(), CaIgnoreError> {
        let Some(path) = self.path.as_deref() else {
            debug!("in-memory CA-ignore store, nothing to persist");
            return Ok(());
        };

        let entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let Some(entry) = entries.get(uuid).copied() else {
            debug!("no CA-ignore row to persist");
            return Ok(());
        };

        let mut file = read_file(path)?;
        file.connections.insert(uuid.to_string(), entry);
        write_file(path, &file)?;

        info!(
            ignore_ca_cert = entry.ignore_ca_cert,
            ignore_phase2_ca_cert = entry.ignore_phase2_ca_cert,
            "persisted CA-ignore row"
        );
        Ok(())
    }

    /// Re-reads the row for `uuid` from the backing file into memory.
    ///
    /// A row missing from the file reads as both flags false.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    #[instrument(skip(self))]
    pub fn load(&self, uuid: &str) -> Result<CaIgnoreEntry, CaIgnoreError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(self.entry(uuid).unwrap_or_default());
        };

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let entry = read_file(path)?
            .connections
            .get(uuid)
            .copied()
            .unwrap_or_default();
        entries.insert(uuid.to_string(), entry);
        Ok(entry)
    }
}

fn read_file(path: &Path) -> Result<CaIgnoreFile, CaIgnoreError> {
    if !path.exists() {
        return Ok(CaIgnoreFile::default());
    }

    let content = fs::read_to_string(path).map_err(|e| CaIgnoreError::ReadFailed {
        path: path.to_path_buf(),
        details: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| CaIgnoreError::InvalidFormat {
        path: path.to_path_buf(),
        details: e.to_string(),
    })
}

fn write_file(path: &Path, file: &CaIgnoreFile) -> Result<(), CaIgnoreError> {
    let write_failed = |details: String| CaIgnoreError::WriteFailed {
        path: path.to_path_buf(),
        details,
    };

    let content = toml::to_string_pretty(file).map_err(|e| write_failed(e.to_string()))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
    }

    let staging = path.with_extension("toml.tmp");
    fs::write(&staging, content).map_err(|e| write_failed(e.to_string()))?;
    fs::rename(&staging, path).map_err(|e| write_failed(e.to_string()))?;
    Ok(())
}
