//! In-memory user document store.

use async_trait::async_trait;
use cgpa_core::error::Result;
use cgpa_core::identity::UserId;
use cgpa_core::record::{RecordState, UserDocumentStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Keeps one record document per user in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserDocumentStore {
    documents: RwLock<HashMap<UserId, RecordState>>,
}

impl InMemoryUserDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

#[async_trait]
impl UserDocumentStore for InMemoryUserDocumentStore {
    async fn load(&self, user: &UserId) -> Result<Option<RecordState>> {
        Ok(self.documents.read().await.get(user).cloned())
    }

    async fn save(&self, user: &UserId, state: &RecordState) -> Result<()> {
        self.documents
            .write()
            .await
            .insert(user.clone(), state.clone());
        Ok(())
    }

    async fn delete(&self, user: &UserId) -> Result<()> {
        self.documents.write().await.remove(user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_overwrites_document() {
        let store = InMemoryUserDocumentStore::new();
        let user = UserId::new("u1");
        assert!(store.is_empty().await);

        store.save(&user, &RecordState::empty()).await.unwrap();
        store.save(&user, &RecordState::seeded()).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(
            store.load(&user).await.unwrap(),
            Some(RecordState::seeded())
        );
    }
}
