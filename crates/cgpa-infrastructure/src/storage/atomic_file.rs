//! Atomic text file operations.
//!
//! Provides a thin layer for safe concurrent access to small data files.

use cgpa_core::error::CgpaError;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic file operations.
#[derive(Debug)]
pub enum AtomicFileError {
    /// File I/O error.
    IoError(std::io::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicFileError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicFileError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicFileError {}

impl From<std::io::Error> for AtomicFileError {
    fn from(e: std::io::Error) -> Self {
        AtomicFileError::IoError(e)
    }
}

impl From<AtomicFileError> for CgpaError {
    fn from(e: AtomicFileError) -> Self {
        match e {
            AtomicFileError::IoError(io) => CgpaError::from(io),
            AtomicFileError::LockError(message) => CgpaError::io(message),
        }
    }
}

/// A handle to a text file written with all-or-nothing semantics.
///
/// Provides:
/// - **Atomicity**: Writes go to a tmp file that is renamed over the target
/// - **Isolation**: An exclusive lock file serializes writers
/// - **Durability**: Explicit fsync before rename
#[derive(Debug, Clone)]
pub struct AtomicFile {
    path: PathBuf,
}

impl AtomicFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Reads the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(String))`: File content
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read the file
    pub fn read(&self) -> Result<Option<String>, AtomicFileError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(content))
    }

    /// Replaces the file content atomically.
    pub fn write(&self, content: &str) -> Result<(), AtomicFileError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let _lock = FileLock::acquire(&self.path)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;

        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Deletes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<(), AtomicFileError> {
        let _lock = FileLock::acquire(&self.path)?;
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicFileError> {
        let parent = self.path.parent().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })?;

        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicFileError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicFileError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicFileError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Unlock is automatic when the file handle is dropped
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("slot.json"));

        file.write("{\"sessions\":[]}").unwrap();
        assert_eq!(file.read().unwrap().as_deref(), Some("{\"sessions\":[]}"));
    }

    #[test]
    fn test_read_missing_and_blank() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("missing.json"));
        assert!(file.read().unwrap().is_none());

        file.write("   \n").unwrap();
        assert!(file.read().unwrap().is_none());
    }

    #[test]
    fn test_no_leftovers_after_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("slot.json");
        let file = AtomicFile::new(path.clone());

        file.write("data").unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join(".slot.json.tmp").exists());
        assert!(!temp_dir.path().join("slot.lock").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("nested/slot.json"));

        file.write("data").unwrap();
        file.remove().unwrap();
        file.remove().unwrap();
        assert!(file.read().unwrap().is_none());
    }
}
