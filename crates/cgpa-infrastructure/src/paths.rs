//! Unified path management for cgpa files.
//!
//! Platform directories come from the `dirs` crate.

use cgpa_core::error::CgpaError;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "cgpa";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for CgpaError {
    fn from(e: PathError) -> Self {
        CgpaError::config(e.to_string())
    }
}

/// Unified path management for cgpa.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/cgpa/              # Config directory
/// └── config.toml              # Application configuration
///
/// ~/.local/share/cgpa/         # Data directory (overridable)
/// ├── local/                   # Anonymous record slot
/// │   └── cgpaCalculatorData.json
/// └── users/                   # One record document per signed-in user
///     └── <user>.json
/// ```
#[derive(Debug, Clone)]
pub struct CgpaPaths {
    data_dir: PathBuf,
}

impl CgpaPaths {
    /// Resolves the data directory, preferring `data_dir_override`.
    pub fn new(data_dir_override: Option<&Path>) -> Result<Self, PathError> {
        let data_dir = match data_dir_override {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_data_dir()?,
        };
        Ok(Self { data_dir })
    }

    /// Returns the cgpa configuration directory (e.g. `~/.config/cgpa/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the platform data directory (e.g. `~/.local/share/cgpa/`).
    pub fn default_data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory of the anonymous key/value slots.
    pub fn local_dir(&self) -> PathBuf {
        self.data_dir.join("local")
    }

    /// Directory of the per-user record documents.
    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join("users")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_layout() {
        let paths = CgpaPaths::new(Some(Path::new("/tmp/cgpa-data"))).unwrap();
        assert_eq!(paths.local_dir(), PathBuf::from("/tmp/cgpa-data/local"));
        assert_eq!(paths.users_dir(), PathBuf::from("/tmp/cgpa-data/users"));
    }

    #[test]
    fn test_path_error_maps_to_config() {
        let err: CgpaError = PathError::HomeDirNotFound.into();
        assert!(matches!(err, CgpaError::Config(_)));
    }
}
