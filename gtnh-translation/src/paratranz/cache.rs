//! Disk-backed memo of previous conversions.
//!
//! Entries are keyed by `(namespace, relpath)` and carry the fingerprint of
//! the input they were computed from. A lookup with any other fingerprint is
//! a miss, and so is a missing, unreadable or corrupt entry.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Error;

/// Lowercase hex SHA-256 of a text.
pub fn fingerprint(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

#[derive(Serialize, Deserialize)]
struct CacheEntry<T> {
    relpath: String,
    fingerprint: String,
    value: T,
}

#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, namespace: &str, relpath: &str) -> PathBuf {
        self.dir
            .join(namespace)
            .join(format!("{}.json", fingerprint(relpath)))
    }

    /// Returns the stored value if it was computed from `fingerprint`.
    pub fn get<T: DeserializeOwned>(
        &self,
        namespace: &str,
        relpath: &str,
        fingerprint: &str,
    ) -> Option<T> {
        let path = self.entry_path(namespace, relpath);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(_) => {
                debug!(namespace, relpath, "cache miss");
                return None;
            }
        };

        let entry: CacheEntry<T> = match serde_json::from_str(&text) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring corrupt cache entry");
                return None;
            }
        };

        if entry.relpath != relpath || entry.fingerprint != fingerprint {
            debug!(namespace, relpath, "cache entry is stale");
            return None;
        }
        Some(entry.value)
    }

    /// Stores a value, replacing whatever was stored for `(namespace, relpath)`.
    ///
    /// The entry is written to a uniquely named temporary file in the same
    /// directory and renamed into place, so readers see either the old or the
    /// new entry even with several writers racing on one relpath.
    pub fn put<T: Serialize>(
        &self,
        namespace: &str,
        relpath: &str,
        fingerprint: &str,
        value: &T,
    ) -> Result<(), Error> {
        let dir = self.dir.join(namespace);
        fs::create_dir_all(&dir)?;
        let path = self.entry_path(namespace, relpath);

        let entry = CacheEntry {
            relpath: relpath.to_string(),
            fingerprint: fingerprint.to_string(),
            value,
        };
        let text = serde_json::to_string(&entry)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        Ok(())
    }
}
