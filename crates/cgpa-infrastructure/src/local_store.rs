//! Device-local record cache.

use crate::dto::{decode_document, encode_document};
use crate::storage::KeyValueStore;
use async_trait::async_trait;
use cgpa_core::config::DEFAULT_LOCAL_KEY;
use cgpa_core::error::Result;
use cgpa_core::record::{RecordRepository, RecordState};
use std::sync::Arc;

/// The anonymous user's records, kept in a single key/value slot.
///
/// Every operation is best-effort: read, parse and write failures are
/// logged and reported as "nothing stored" or silently dropped, so callers
/// never see an error from the local cache.
#[derive(Clone)]
pub struct LocalStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
}

impl LocalStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// A store using the default slot key.
    pub fn with_default_key(kv: Arc<dyn KeyValueStore>) -> Self {
        Self::new(kv, DEFAULT_LOCAL_KEY)
    }

    /// Reads the slot. Absent, unreadable or unparsable data is `None`.
    pub fn load_snapshot(&self) -> Option<RecordState> {
        let content = match self.kv.get(&self.key) {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read local records '{}': {}", self.key, e);
                return None;
            }
        };

        match decode_document(&content) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Ignoring unparsable local records '{}': {}", self.key, e);
                None
            }
        }
    }

    pub fn save_snapshot(&self, state: &RecordState) {
        let result = encode_document(state).and_then(|content| self.kv.set(&self.key, &content));
        if let Err(e) = result {
            tracing::warn!("Failed to save local records '{}': {}", self.key, e);
        }
    }

    pub fn clear_snapshot(&self) {
        if let Err(e) = self.kv.remove(&self.key) {
            tracing::warn!("Failed to clear local records '{}': {}", self.key, e);
        }
    }
}

#[async_trait]
impl RecordRepository for LocalStore {
    async fn load(&self) -> Result<Option<RecordState>> {
        Ok(self.load_snapshot())
    }

    async fn save(&self, state: &RecordState) -> Result<()> {
        self.save_snapshot(state);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.clear_snapshot();
        Ok(())
    }
}
