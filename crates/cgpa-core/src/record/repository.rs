//! Record repository traits.
//!
//! Defines the persistence seams the sync layer talks to. Implementations
//! live in the infrastructure crate.

use super::model::RecordState;
use crate::error::Result;
use crate::identity::UserId;
use async_trait::async_trait;

/// One backend holding a single record snapshot.
///
/// Both the local cache and a signed-in user's remote document are exposed
/// through this trait, so the sync controller can save to whichever is
/// active without knowing which it is.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Loads the stored snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(RecordState))`: Snapshot found
    /// - `Ok(None)`: Nothing stored yet
    /// - `Err(_)`: The backend could not be read
    async fn load(&self) -> Result<Option<RecordState>>;

    /// Overwrites the stored snapshot.
    async fn save(&self, state: &RecordState) -> Result<()>;

    /// Removes the stored snapshot, if any.
    async fn clear(&self) -> Result<()>;
}

/// A document store holding one record document per user.
///
/// Writes are full-document overwrites. Two devices writing for the same
/// user resolve as last write wins.
#[async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Finds the document of a user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(RecordState))`: Document found
    /// - `Ok(None)`: The user has no document yet
    /// - `Err(_)`: Transient failure reaching the store
    async fn load(&self, user: &UserId) -> Result<Option<RecordState>>;

    /// Replaces the document of a user.
    async fn save(&self, user: &UserId, state: &RecordState) -> Result<()>;

    /// Deletes the document of a user. A missing document is not an error.
    async fn delete(&self, user: &UserId) -> Result<()>;
}
