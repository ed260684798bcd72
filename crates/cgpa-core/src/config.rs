//! Application configuration model.
//!
//! Loaded from `config.toml` by the infrastructure crate. Every field has a
//! default, so a missing file or a partial file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Key of the local snapshot slot.
pub const DEFAULT_LOCAL_KEY: &str = "cgpaCalculatorData";

/// Quiet period before a settled mutation is persisted.
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SyncSettings {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SyncSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_local_key")]
    pub local_key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            data_dir: None,
            local_key: default_local_key(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// `tracing` filter directive, e.g. `info` or `cgpa=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_local_key() -> String {
    DEFAULT_LOCAL_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.sync.debounce(), Duration::from_secs(1));
        assert_eq!(config.storage.local_key, "cgpaCalculatorData");
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str("[sync]\ndebounce_ms = 250\n").unwrap();
        assert_eq!(config.sync.debounce_ms, 250);
        assert_eq!(config.storage.local_key, DEFAULT_LOCAL_KEY);
    }
}
