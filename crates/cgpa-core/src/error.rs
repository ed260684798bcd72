//! Error types for the CGPA application.

use thiserror::Error;

/// A shared error type for every CGPA crate.
///
/// Storage adapters convert their local failures into one of these variants
/// before handing them to the sync layer, which only ever logs them.
#[derive(Error, Debug, Clone)]
pub enum CgpaError {
    /// IO error (file system or remote document operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CgpaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this error belongs to the transient class.
    ///
    /// Transient failures (I/O and data access) are logged by the sync layer
    /// and leave the in-memory records untouched. They are never retried
    /// automatically.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::DataAccess(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CgpaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CgpaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CgpaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CgpaError>`.
pub type Result<T> = std::result::Result<T, CgpaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_is_transient() {
        let err: CgpaError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.is_transient());
        assert!(err.to_string().contains("PermissionDenied"));
    }

    #[test]
    fn test_json_error_is_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: CgpaError = parse.unwrap_err().into();
        assert!(err.is_serialization());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_toml_error_is_serialization() {
        let err: CgpaError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().starts_with("Serialization error: TOML"));
    }
}
