//! JSON-file pool persistence.
//!
//! Each pool is a JSON array in its own file. The batch reads both files
//! fully at start and rewrites them fully at end; nothing is persisted
//! per record, so a crash mid-batch loses the run's new entries but never
//! corrupts prior ones. Files are pretty-printed with 2-space indentation
//! because they are hand-edited between runs during catalog curation.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::model::{MatchEntry, StorageError, UnmatchedEntry};
use crate::storage::{PoolState, PoolStore};

pub struct JsonPoolStore {
    match_path: PathBuf,
    unmatched_path: PathBuf,
}

impl JsonPoolStore {
    pub fn new(match_path: impl Into<PathBuf>, unmatched_path: impl Into<PathBuf>) -> Self {
        Self {
            match_path: match_path.into(),
            unmatched_path: unmatched_path.into(),
        }
    }

    fn load_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            // no file yet means an empty starting pool, not an error
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Io {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        };

        // an unparsable pool is fatal: silently restarting from empty would
        // re-flag entries already resolved in earlier runs
        serde_json::from_str(&content).map_err(|e| StorageError::PoolCorrupt {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn save_array<T: Serialize>(path: &Path, entries: &[T]) -> Result<(), StorageError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"  ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        entries
            .serialize(&mut serializer)
            .map_err(|e| StorageError::Serialize {
                path: path.display().to_string(),
                source: e,
            })?;
        buf.push(b'\n');

        fs::write(path, buf).map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }
}

impl PoolStore for JsonPoolStore {
    fn load(&self) -> Result<PoolState, StorageError> {
        Ok(PoolState {
            matches: Self::load_array(&self.match_path)?,
            unmatched: Self::load_array(&self.unmatched_path)?,
        })
    }

    fn save(
        &self,
        matches: &[MatchEntry],
        unmatched: &[UnmatchedEntry],
    ) -> Result<(), StorageError> {
        Self::save_array(&self.match_path, matches)?;
        Self::save_array(&self.unmatched_path, unmatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> MatchEntry {
        MatchEntry {
            original: "Golf (1K1)".to_string(),
            normalized: "GOLF 1K1".to_string(),
            model_id: 100,
            marka_id: 5,
        }
    }

    #[test]
    fn missing_files_load_as_empty_pools() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonPoolStore::new(dir.path().join("eslesen.json"), dir.path().join("eslesmeyen.json"));

        let pools = store.load().unwrap();
        assert!(pools.matches.is_empty());
        assert!(pools.unmatched.is_empty());
    }

    #[test]
    fn corrupt_pool_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let match_path = dir.path().join("eslesen.json");
        fs::write(&match_path, "[{ not json").unwrap();
        let store = JsonPoolStore::new(match_path, dir.path().join("eslesmeyen.json"));

        let err = store.load().unwrap_err();
        assert!(matches!(err, StorageError::PoolCorrupt { .. }));
    }

    #[test]
    fn saved_pools_load_back_and_use_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let match_path = dir.path().join("eslesen.json");
        let store = JsonPoolStore::new(&match_path, dir.path().join("eslesmeyen.json"));

        let unmatched = UnmatchedEntry {
            marka_name: "LADA".to_string(),
            model_name: "SAMARA".to_string(),
            original_marka: "Lada".to_string(),
            original_model: "Samara".to_string(),
        };
        store.save(&[entry()], &[unmatched]).unwrap();

        let pools = store.load().unwrap();
        assert_eq!(pools.matches.len(), 1);
        assert_eq!(pools.matches[0].normalized, "GOLF 1K1");
        assert_eq!(pools.unmatched.len(), 1);

        let raw = fs::read_to_string(&match_path).unwrap();
        assert!(raw.contains("\n  {"));
        assert!(raw.contains("\n    \"original\""));
        assert!(!raw.contains("\n        \"original\""));
    }
}
