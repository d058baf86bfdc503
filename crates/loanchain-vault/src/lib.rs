//! LoanChain Deal Vault
//!
//! Implements the DealVault trait as a directory of JSON files, one file per
//! saved deal.
//!
//! # Layout
//!
//! - Each record is written as pretty-printed JSON to `deal-<unix-millis>.json`
//! - A second save within the same millisecond gets a `-<n>` suffix
//! - Reading returns every parseable `*.json` file; broken files are skipped
//!
//! # Examples
//!
//! ```no_run
//! use loanchain_vault::DirectoryVault;
//!
//! let vault = DirectoryVault::new("/tmp/loanchain/deals");
//! // Vault is now ready for save/load operations
//! ```

#![warn(missing_docs)]

use loanchain_domain::traits::DealVault;
use loanchain_domain::DealRecord;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

const FILE_PREFIX: &str = "deal-";
const FILE_EXTENSION: &str = "json";

/// Errors that can occur during vault operations
#[derive(Error, Debug)]
pub enum VaultError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Record could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key does not name a file inside the vault
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

/// Directory-backed implementation of DealVault
///
/// The directory is created on first save. A directory that does not exist
/// reads as an empty vault.
#[derive(Debug, Clone)]
pub struct DirectoryVault {
    dir: PathBuf,
}

impl DirectoryVault {
    /// Create a vault rooted at `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory the vault writes to
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file stored under `key`
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if the key is not a plain file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, VaultError> {
        let candidate = Path::new(key);
        if key.is_empty() || candidate.file_name() != Some(candidate.as_os_str()) {
            return Err(VaultError::InvalidPath(key.to_string()));
        }
        Ok(self.dir.join(key))
    }

    /// Read one record by key
    pub fn load(&self, key: &str) -> Result<DealRecord, VaultError> {
        let contents = fs::read_to_string(self.path_for(key)?)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Open a fresh file for `record`, never overwriting an existing one
    fn create_file(&self, record: &DealRecord) -> Result<(String, fs::File), VaultError> {
        let millis = record.saved_at.timestamp_millis();
        let mut attempt = 0u32;
        loop {
            let key = if attempt == 0 {
                format!("{}{}.{}", FILE_PREFIX, millis, FILE_EXTENSION)
            } else {
                format!("{}{}-{}.{}", FILE_PREFIX, millis, attempt, FILE_EXTENSION)
            };
            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(self.dir.join(&key))
            {
                Ok(file) => return Ok((key, file)),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl DealVault for DirectoryVault {
    type Error = VaultError;

    fn save(&self, record: &DealRecord) -> Result<String, Self::Error> {
        fs::create_dir_all(&self.dir)?;

        let json = serde_json::to_string_pretty(record)?;
        let (key, mut file) = self.create_file(record)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        debug!("Saved deal '{}' as {}", record.deal.agreement.name, key);
        Ok(key)
    }

    fn load_all(&self) -> Result<Vec<DealRecord>, Self::Error> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(key) = path.file_name().and_then(|name| name.to_str()) else {
                warn!("Skipping vault file with non-UTF-8 name: {}", path.display());
                continue;
            };

            match self.load(key) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable vault file {}: {}", path.display(), e),
            }
        }

        debug!("Loaded {} deals from {}", records.len(), self.dir.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_for_rejects_traversal() {
        let vault = DirectoryVault::new("/tmp/vault");
        assert!(vault.path_for("deal-1.json").is_ok());
        assert!(matches!(vault.path_for("../secret.json"), Err(VaultError::InvalidPath(_))));
        assert!(matches!(vault.path_for("a/b.json"), Err(VaultError::InvalidPath(_))));
        assert!(matches!(vault.path_for(""), Err(VaultError::InvalidPath(_))));
    }

    #[test]
    fn test_missing_directory_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vault = DirectoryVault::new(dir.path().join("never-created"));
        assert!(vault.load_all().unwrap().is_empty());
    }
}
