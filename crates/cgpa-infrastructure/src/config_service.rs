//! Configuration service implementation.
//!
//! Loads [`AppConfig`] from `config.toml` (by default
//! `~/.config/cgpa/config.toml`).

use crate::paths::CgpaPaths;
use cgpa_core::config::AppConfig;
use cgpa_core::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `path` when given, otherwise the platform config file.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => CgpaPaths::config_file()?,
        };
        Ok(Self::new(path))
    }

    /// Reads the configuration.
    ///
    /// A missing file yields the defaults. A file that exists but does not
    /// parse is an error; it is never overwritten.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!("No config at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        let config: AppConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::new(temp_dir.path().join("config.toml"));
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_loads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[sync]\ndebounce_ms = 50\n\n[storage]\nlocal_key = \"slot\"\n",
        )
        .unwrap();

        let config = ConfigService::new(&path).load().unwrap();
        assert_eq!(config.sync.debounce_ms, 50);
        assert_eq!(config.storage.local_key, "slot");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[sync\ndebounce_ms = ").unwrap();

        let err = ConfigService::new(&path).load().unwrap_err();
        assert!(err.is_serialization());
    }
}
