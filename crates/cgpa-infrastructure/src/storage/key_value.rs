//! Synchronous key/value slots backing the local cache.

use super::atomic_file::AtomicFile;
use cgpa_core::error::{CgpaError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A string-keyed slot store with browser local-storage semantics.
///
/// Calls are synchronous and expected to be fast; every value is a complete
/// serialized document.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Maps an arbitrary key or user id onto a safe file stem.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes
/// `%XX`, so distinct keys never share a file.
pub(crate) fn encode_file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{:02X}", byte));
        }
    }
    stem
}

/// One `<key>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot(&self, key: &str) -> AtomicFile {
        AtomicFile::new(self.dir.join(format!("{}.json", encode_file_stem(key))))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slot(key).read()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        Ok(self.slot(key).write(value)?)
    }

    fn remove(&self, key: &str) -> Result<()> {
        Ok(self.slot(key).remove()?)
    }
}

/// In-process slots, lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_slots<T>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> T) -> Result<T> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| CgpaError::internal(format!("Failed to acquire lock: {}", e)))?;
        Ok(f(&mut slots))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_slots(|slots| slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_slots(|slots| {
            slots.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_slots(|slots| {
            slots.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_encode_file_stem() {
        assert_eq!(encode_file_stem("cgpaCalculatorData"), "cgpaCalculatorData");
        assert_eq!(encode_file_stem("a/b.c"), "a%2Fb%2Ec");
        assert_ne!(encode_file_stem("a b"), encode_file_stem("a_b"));
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("local"));

        assert!(store.get("k").unwrap().is_none());
        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
        assert!(temp_dir.path().join("local/k.json").exists());

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryKeyValueStore::new();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }
}
