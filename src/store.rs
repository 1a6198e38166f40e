//! Whole-collection snapshot persistence.
//!
//! The account collection is read once at session start and rewritten
//! wholesale after each mutating action. There are no partial updates and
//! no concurrency control; the last writer wins.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

use crate::model::Account;

/// Errors that can occur while reading or writing the snapshot file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read snapshot {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write snapshot {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("snapshot {path} is malformed: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },
}

/// A snapshot store over one JSON document holding every account with its
/// ordered card list.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the whole account collection. A missing file is an empty
    /// collection, not an error.
    pub fn find_all(&self) -> Result<Vec<Account>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.display_path(),
                    source,
                });
            }
        };

        serde_json::from_str(&contents).map_err(|source| StoreError::Malformed {
            path: self.display_path(),
            source,
        })
    }

    /// Overwrite the snapshot with the full collection.
    pub fn save(&self, accounts: &[Account]) -> Result<(), StoreError> {
        let contents =
            serde_json::to_string_pretty(accounts).map_err(|source| StoreError::Malformed {
                path: self.display_path(),
                source,
            })?;

        fs::write(&self.path, contents).map_err(|source| StoreError::Write {
            path: self.display_path(),
            source,
        })?;

        debug!(
            path = %self.path.display(),
            accounts = accounts.len(),
            "snapshot saved"
        );
        Ok(())
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}
