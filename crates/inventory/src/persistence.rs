//! JSON snapshot persistence for [`InventoryStore`].
//!
//! The on-disk format is a single JSON object of item name to quantity,
//! written with 2-space indentation. No versioning, no atomic replace.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;

use crate::item::{ItemName, Quantity};
use crate::store::InventoryStore;

/// File used when the caller does not name one.
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.json";

type Snapshot = IndexMap<ItemName, Quantity>;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("File '{}' not found. Starting with empty inventory.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Error decoding JSON from '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error reading data from '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error encoding inventory: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Error saving data to '{}': {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistenceError {
    /// Missing or malformed files leave an empty, usable store behind.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Decode { .. })
    }
}

impl InventoryStore {
    /// Replace the store's contents with the snapshot at `path`.
    ///
    /// A missing or malformed file resets the store to empty and is returned
    /// as a recoverable error. Any other read fault leaves the store as it was.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        match read_snapshot(path) {
            Ok(snapshot) => {
                self.replace(snapshot);
                tracing::debug!("loaded {} item(s) from '{}'", self.len(), path.display());
                Ok(())
            }
            Err(err @ PersistenceError::NotFound { .. }) => {
                tracing::warn!("Warning: {err}");
                self.clear();
                Err(err)
            }
            Err(err @ PersistenceError::Decode { .. }) => {
                tracing::error!("{err}");
                self.clear();
                Err(err)
            }
            Err(err) => {
                tracing::error!("{err}");
                Err(err)
            }
        }
    }

    /// Write the whole store to `path` as pretty-printed JSON.
    ///
    /// The in-memory store is never modified, whatever the outcome.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        let path = path.as_ref();
        match write_snapshot(path, &self.quantities) {
            Ok(()) => {
                tracing::debug!("saved {} item(s) to '{}'", self.len(), path.display());
                Ok(())
            }
            Err(err) => {
                tracing::error!("{err}");
                Err(err)
            }
        }
    }
}

fn read_snapshot(path: &Path) -> Result<Snapshot, PersistenceError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            PersistenceError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            PersistenceError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| PersistenceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), PersistenceError> {
    let mut json = serde_json::to_string_pretty(snapshot).map_err(PersistenceError::Encode)?;
    json.push('\n');

    fs::write(path, json).map_err(|source| PersistenceError::Save {
        path: path.to_path_buf(),
        source,
    })
}
