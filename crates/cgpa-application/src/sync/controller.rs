//! The sync state machine.

use super::LOG_TARGET;
use super::policy::is_worth_migrating;
use super::state::{Backend, SyncState};
use cgpa_core::identity::{Identity, UserId};
use cgpa_core::record::{Mutation, RecordModel, RecordRepository, RecordState, UserDocumentStore};
use cgpa_infrastructure::RemoteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Owns the record model and decides where it is persisted.
///
/// The controller is the single writer of the model. It reacts to three
/// inputs: an identity change, a mutation, and the debounce deadline
/// elapsing (delivered as [`SyncController::flush`]). It performs no
/// scheduling of its own; [`super::run`] drives it from an event loop.
pub struct SyncController {
    local: Arc<dyn RecordRepository>,
    documents: Arc<dyn UserDocumentStore>,
    debounce: Duration,
    model: RecordModel,
    state: SyncState,
    /// Last identity whose load completed.
    identity: Option<Identity>,
}

impl SyncController {
    pub fn new(
        local: Arc<dyn RecordRepository>,
        documents: Arc<dyn UserDocumentStore>,
        debounce: Duration,
    ) -> Self {
        Self {
            local,
            documents,
            debounce,
            model: RecordModel::new(RecordState::empty()),
            state: SyncState::Uninitialized,
            identity: None,
        }
    }

    pub fn model(&self) -> &RecordModel {
        &self.model
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn backend(&self) -> Option<&Backend> {
        self.state.backend()
    }

    /// When the pending save is due, if one is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.state.deadline()
    }

    // ============================================================================
    // Identity changes
    // ============================================================================

    /// Switches the authoritative backend to the one belonging to `identity`.
    ///
    /// A pending save is written to its original backend first. Re-sending
    /// the identity that is already active does nothing.
    pub async fn handle_identity_change(&mut self, identity: Identity) {
        if self.identity.as_ref() == Some(&identity) {
            tracing::debug!(target: LOG_TARGET, "Identity {} unchanged, ignoring", identity);
            return;
        }

        self.flush().await;

        let previous = self.state.backend().cloned();
        tracing::info!(target: LOG_TARGET, "Identity changed to {}", identity);
        self.state = SyncState::LoadingForIdentity(identity.clone());

        let loaded = match &identity {
            Identity::SignedIn(user) => self.load_for_user(user, previous).await,
            Identity::Anonymous => {
                self.load_local().await;
                true
            }
        };
        if loaded {
            self.identity = Some(identity);
        }
    }

    /// Returns false when the remote load failed and the identity should not
    /// be treated as processed.
    async fn load_for_user(&mut self, user: &UserId, previous: Option<Backend>) -> bool {
        let remote = RemoteStore::new(self.documents.clone(), user.clone());

        match remote.load().await {
            Ok(Some(state)) => {
                tracing::info!(
                    target: LOG_TARGET,
                    "Adopted remote records for {} ({} sessions)",
                    user,
                    state.sessions.len()
                );
                self.model = RecordModel::adopt(state);
                self.state = SyncState::Ready(Backend::Remote(user.clone()));
                true
            }
            Ok(None) => {
                self.initialize_remote(&remote).await;
                self.state = SyncState::Ready(Backend::Remote(user.clone()));
                true
            }
            Err(e) => {
                tracing::error!(
                    target: LOG_TARGET,
                    "Failed to load remote records for {}: {}",
                    user,
                    e
                );
                match previous {
                    Some(backend) => self.state = SyncState::Ready(backend),
                    None => self.load_local().await,
                }
                false
            }
        }
    }

    /// Fills a user's missing remote document, migrating local data once
    /// when it is worth keeping.
    async fn initialize_remote(&mut self, remote: &RemoteStore) {
        let local = self.load_local_snapshot().await;
        let Some(local) = local.filter(is_worth_migrating) else {
            tracing::info!(
                target: LOG_TARGET,
                "No remote records for {}, starting from the default session",
                remote.user()
            );
            self.model = RecordModel::seeded();
            return;
        };

        let migrated = local.normalized();
        match remote.save(&migrated).await {
            Ok(()) => {
                tracing::info!(
                    target: LOG_TARGET,
                    "Migrated local records to {} ({} courses)",
                    remote.user(),
                    migrated.course_count()
                );
                if let Err(e) = self.local.clear().await {
                    tracing::warn!(target: LOG_TARGET, "Failed to clear local records: {}", e);
                }
            }
            Err(e) => {
                tracing::error!(
                    target: LOG_TARGET,
                    "Failed to migrate local records to {}: {}",
                    remote.user(),
                    e
                );
            }
        }
        self.model = RecordModel::adopt(migrated);
    }

    async fn load_local(&mut self) {
        match self.load_local_snapshot().await {
            Some(state) => {
                tracing::info!(
                    target: LOG_TARGET,
                    "Adopted local records ({} sessions)",
                    state.sessions.len()
                );
                self.model = RecordModel::adopt(state);
            }
            None if self.model.state.is_empty() => {
                tracing::info!(
                    target: LOG_TARGET,
                    "No local records, starting from the default session"
                );
                self.model = RecordModel::seeded();
            }
            None => {
                tracing::debug!(target: LOG_TARGET, "No local records, keeping current records");
            }
        }
        self.state = SyncState::Ready(Backend::Local);
    }

    async fn load_local_snapshot(&self) -> Option<RecordState> {
        match self.local.load().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(target: LOG_TARGET, "Failed to load local records: {}", e);
                None
            }
        }
    }

    // ============================================================================
    // Mutations and persistence
    // ============================================================================

    /// Applies a mutation to the model.
    ///
    /// When the record state actually changed and a backend is active, the
    /// new snapshot replaces any pending one and the deadline restarts.
    /// Returns whether a save is now scheduled because of this mutation.
    pub fn apply(&mut self, mutation: &Mutation) -> bool {
        let next = self.model.apply(mutation);
        let changed = next.state != self.model.state;
        self.model = next;

        if !changed {
            tracing::trace!(target: LOG_TARGET, "{} left records unchanged", mutation.kind());
            return false;
        }

        let Some(backend) = self.state.backend().cloned() else {
            tracing::debug!(
                target: LOG_TARGET,
                "{} applied before any backend is active, not scheduling a save",
                mutation.kind()
            );
            return false;
        };

        let deadline = Instant::now() + self.debounce;
        tracing::debug!(
            target: LOG_TARGET,
            "{} scheduled a save to {} in {:?}",
            mutation.kind(),
            backend,
            self.debounce
        );
        self.state = SyncState::SavingDebounced {
            pending: self.model.state.clone(),
            backend,
            deadline,
        };
        true
    }

    /// Writes the pending snapshot now, if there is one.
    ///
    /// The controller returns to `Ready` on success and on failure alike;
    /// failures are logged and never retried.
    pub async fn flush(&mut self) {
        match std::mem::replace(&mut self.state, SyncState::Uninitialized) {
            SyncState::SavingDebounced {
                pending, backend, ..
            } => {
                self.state = SyncState::Ready(backend.clone());
                self.save_to(&backend, &pending).await;
            }
            other => self.state = other,
        }
    }

    /// Writes `snapshot` to `backend` immediately.
    ///
    /// A snapshot without sessions is never handed to a remote store.
    pub async fn save_to(&self, backend: &Backend, snapshot: &RecordState) {
        match backend {
            Backend::Local => {
                if let Err(e) = self.local.save(snapshot).await {
                    tracing::warn!(target: LOG_TARGET, "Failed to save local records: {}", e);
                }
            }
            Backend::Remote(user) => {
                if snapshot.is_empty() {
                    tracing::warn!(
                        target: LOG_TARGET,
                        "Refusing to save a snapshot with no sessions for {}",
                        user
                    );
                    return;
                }
                let remote = RemoteStore::new(self.documents.clone(), user.clone());
                match remote.save(snapshot).await {
                    Ok(()) => tracing::debug!(target: LOG_TARGET, "Saved records for {}", user),
                    Err(e) => tracing::error!(
                        target: LOG_TARGET,
                        "Failed to save records for {}: {}",
                        user,
                        e
                    ),
                }
            }
        }
    }
}
