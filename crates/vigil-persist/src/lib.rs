//! JSON file-backed snapshot persistence.
//!
//! A [`JsonStore`] owns one file, `<dir>/<name>.json`, holding a complete
//! snapshot of some serializable state. Saves are atomic: the snapshot is
//! written to a sibling temporary file and renamed over the target.

#![forbid(unsafe_code)]

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Errors raised while reading or writing a snapshot.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Filesystem access failed.
    #[error("snapshot I/O failed for {}: {source}", path.display())]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed for {}: {source}", path.display())]
    Serialization {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, PersistError>;

/// A single JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Creates a store for `<dir>/<name>.json`. Nothing is touched on disk.
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            path: dir.join(format!("{name}.json")),
        }
    }

    /// Returns the snapshot path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, returning `None` if no snapshot exists yet.
    pub fn try_load<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| PersistError::Serialization {
                path: self.path.clone(),
                source,
            })
    }

    /// Atomically replaces the snapshot with `value`.
    pub fn save<T: Serialize>(&self, value: &T) -> Result<()> {
        let io_err = |source| PersistError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let bytes =
            serde_json::to_vec_pretty(value).map_err(|source| PersistError::Serialization {
                path: self.path.clone(),
                source,
            })?;

        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(io_err)?;
            file.write_all(&bytes).map_err(io_err)?;
            file.sync_all().map_err(io_err)?;
        }
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), bytes = bytes.len(), "snapshot saved");
        Ok(())
    }
}
