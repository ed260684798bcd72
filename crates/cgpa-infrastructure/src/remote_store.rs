//! A signed-in user's record document.

use async_trait::async_trait;
use cgpa_core::error::Result;
use cgpa_core::identity::UserId;
use cgpa_core::record::{RecordRepository, RecordState, UserDocumentStore};
use std::sync::Arc;

/// The record document of one user inside a [`UserDocumentStore`].
///
/// Unlike [`crate::LocalStore`], failures are returned to the caller.
#[derive(Clone)]
pub struct RemoteStore {
    documents: Arc<dyn UserDocumentStore>,
    user: UserId,
}

impl RemoteStore {
    pub fn new(documents: Arc<dyn UserDocumentStore>, user: UserId) -> Self {
        Self { documents, user }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }
}

#[async_trait]
impl RecordRepository for RemoteStore {
    async fn load(&self) -> Result<Option<RecordState>> {
        self.documents.load(&self.user).await
    }

    async fn save(&self, state: &RecordState) -> Result<()> {
        self.documents.save(&self.user, state).await
    }

    async fn clear(&self) -> Result<()> {
        self.documents.delete(&self.user).await
    }
}
