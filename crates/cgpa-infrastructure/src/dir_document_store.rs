//! Directory-backed user document store.
//!
//! Serves as the remote document database for the CLI: each user owns one
//! `<encoded-user-id>.json` file below the store directory.

use crate::dto::{decode_document, encode_document};
use crate::storage::{AtomicFile, encode_file_stem};
use async_trait::async_trait;
use cgpa_core::error::{CgpaError, Result};
use cgpa_core::identity::UserId;
use cgpa_core::record::{RecordState, UserDocumentStore};
use std::path::PathBuf;

/// One JSON document per user inside a directory.
///
/// Blocking file I/O runs on the tokio blocking pool. A document that cannot
/// be parsed is reported as a data-access error rather than an absent
/// document, so a corrupt file is never silently replaced by a fresh one.
#[derive(Debug, Clone)]
pub struct DirUserDocumentStore {
    root: PathBuf,
}

impl DirUserDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn document(&self, user: &UserId) -> AtomicFile {
        AtomicFile::new(
            self.root
                .join(format!("{}.json", encode_file_stem(user.as_str()))),
        )
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| CgpaError::internal(format!("Document task failed: {}", e)))?
}

#[async_trait]
impl UserDocumentStore for DirUserDocumentStore {
    async fn load(&self, user: &UserId) -> Result<Option<RecordState>> {
        let file = self.document(user);
        let user = user.clone();
        run_blocking(move || {
            let Some(content) = file.read()? else {
                return Ok(None);
            };
            decode_document(&content).map(Some).map_err(|e| {
                CgpaError::data_access(format!("Corrupt document for user '{}': {}", user, e))
            })
        })
        .await
    }

    async fn save(&self, user: &UserId, state: &RecordState) -> Result<()> {
        let file = self.document(user);
        let content = encode_document(state)?;
        run_blocking(move || Ok(file.write(&content)?)).await?;
        tracing::debug!("Saved document for user '{}'", user);
        Ok(())
    }

    async fn delete(&self, user: &UserId) -> Result<()> {
        let file = self.document(user);
        run_blocking(move || Ok(file.remove()?)).await
    }
}
