//! JSON-file substrate.
//!
//! The whole store is one JSON object of string values, the same layout a
//! browser uses for local storage. Each write goes to a uniquely named temp
//! file in the same directory, which is then renamed over the store, so
//! readers never observe a partial file, even across processes.

use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use super::{KeyValueStore, StoreError};

type Entries = BTreeMap<String, String>;

/// A store persisted to a single JSON file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write of the file within this process.
    lock: Mutex<()>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// The file is not touched until the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Store file is not a JSON object of strings, treating as empty"
                );
                Ok(Entries::new())
            }
        }
    }

    fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&serde_json::to_vec_pretty(entries)?)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) -> Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.load()?;
        apply(&mut entries);
        self.persist(&entries)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn temp_store_path() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tidepool.json");
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, path) = temp_store_path();
        let store = FileStore::new(path);
        assert!(store.get("users").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let (_dir, path) = temp_store_path();
        FileStore::new(&path).set("loggedInUser", "\"marlin\"").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("loggedInUser").unwrap().as_deref(),
            Some("\"marlin\"")
        );

        reopened.remove("loggedInUser").unwrap();
        assert!(FileStore::new(&path).get("loggedInUser").unwrap().is_none());
    }

    #[test]
    fn test_garbage_file_reads_empty_and_is_replaced() {
        let (_dir, path) = temp_store_path();
        fs::write(&path, "this is not json").unwrap();

        let store = FileStore::new(&path);
        assert!(store.get("cart").unwrap().is_none());

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_writes_leave_no_temp_files() {
        let (dir, path) = temp_store_path();
        let store = FileStore::new(&path);
        store.set("cart", "[]").unwrap();
        store.set("loggedInUser", "\"dory\"").unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, [path.file_name().unwrap().to_owned()]);
    }

    #[test]
    fn test_concurrent_writers_on_one_file() {
        let (_dir, path) = temp_store_path();
        // Separate stores share no in-process lock, like separate processes
        let writers: Vec<_> = (0..8)
            .map(|n| {
                let path = path.clone();
                std::thread::spawn(move || {
                    FileStore::new(path).set(&format!("key{n}"), "\"v\"").unwrap();
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let raw = fs::read_to_string(&path).unwrap();
        let entries: Entries = serde_json::from_str(&raw).unwrap();
        assert!(!entries.is_empty());
    }
}
