// Session metadata cache - JSON file mapping conversation UUIDs to
// opaque session metadata produced by the remote client

use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk cache of remote session checkpoints.
///
/// The file holds a single JSON object; values are stored verbatim and
/// never interpreted. The file is a shared, unsynchronized resource:
/// concurrent writers race and the last one wins. Callers needing
/// stronger guarantees must serialize invocations externally.
#[derive(Debug)]
pub struct SessionCache {
    path: PathBuf,
    entries: HashMap<String, Value>,
}

impl SessionCache {
    /// Open the cache file, creating it with an empty object if absent.
    ///
    /// An unparseable file is treated as empty rather than an error; the
    /// next persist overwrites it with valid JSON.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "{}")?;
            debug!("Created empty session cache at {}", path.display());
        }

        let raw = fs::read_to_string(&path)?;
        let entries = match serde_json::from_str::<HashMap<String, Value>>(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(
                    "Session cache at {} is not valid JSON ({}); starting empty",
                    path.display(),
                    err
                );
                HashMap::new()
            }
        };
        debug!("Loaded {} cached session(s)", entries.len());

        Ok(Self { path, entries })
    }

    /// Look up the session metadata stored under a conversation UUID.
    pub fn get(&self, uuid: &str) -> Option<&Value> {
        self.entries.get(uuid)
    }

    /// Store session metadata under a conversation UUID (in memory only;
    /// call [`persist`](Self::persist) to write it out).
    pub fn insert(&mut self, uuid: impl Into<String>, metadata: Value) {
        self.entries.insert(uuid.into(), metadata);
    }

    /// Truncate the cache file and serialize the full map back to disk.
    pub fn persist(&self) -> Result<()> {
        fs::write(&self.path, serde_json::to_string(&self.entries)?)?;
        debug!(
            "Persisted {} session(s) to {}",
            self.entries.len(),
            self.path.display()
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
