//! JSON file persistence for the headline snapshot

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::domain::{HistorySnapshot, SnapshotStore};

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to read snapshot {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot {} is not valid JSON: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to write snapshot {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Snapshot kept as a single pretty-printed JSON document.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl JsonFileSnapshotStore {
    fn read_snapshot(&self) -> Result<Option<HistorySnapshot>, SnapshotError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No snapshot at {:?}", self.path);
                return Ok(None);
            }
            Err(source) => {
                return Err(SnapshotError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SnapshotError::Decode {
                path: self.path.clone(),
                source,
            })
    }

    fn write_snapshot(&self, snapshot: &HistorySnapshot) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(snapshot).map_err(SnapshotError::Encode)?;
        let write_err = |source| SnapshotError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Readers never see a partially written snapshot.
        let temp = self.temp_path();
        fs::write(&temp, json).map_err(write_err)?;
        fs::rename(&temp, &self.path).map_err(write_err)?;

        info!(
            "Saved snapshot with {} headline(s) to {:?}",
            snapshot.headline_entries.len(),
            self.path
        );
        Ok(())
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> anyhow::Result<Option<HistorySnapshot>> {
        Ok(self.read_snapshot()?)
    }

    fn save(&self, snapshot: &HistorySnapshot) -> anyhow::Result<()> {
        Ok(self.write_snapshot(snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::HeadlineEntry;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample() -> HistorySnapshot {
        HistorySnapshot::new(
            Utc::now(),
            [HeadlineEntry {
                brand: "SJC".into(),
                item_name: "SJC 1L/10L/1KG".into(),
                sell_price: 154_800_000,
            }],
        )
    }

    #[test]
    fn test_missing_file_is_absent_history() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("history.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("nested").join("history.json"));

        let snapshot = sample();
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("history.json"));

        store.save(&sample()).unwrap();
        let replacement = HistorySnapshot::empty(Utc::now());
        store.save(&replacement).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert!(loaded.entry("SJC").is_none());
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let err = JsonFileSnapshotStore::new(&path).load().unwrap_err();
        assert!(matches!(err.downcast_ref::<SnapshotError>(), Some(SnapshotError::Decode { .. })));
    }
}
