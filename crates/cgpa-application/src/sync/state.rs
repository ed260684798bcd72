//! Sync state machine states.

use cgpa_core::identity::{Identity, UserId};
use cgpa_core::record::RecordState;
use std::fmt;
use tokio::time::Instant;

/// The store that is authoritative for the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Local,
    Remote(UserId),
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Local => f.write_str("local"),
            Backend::Remote(user) => write!(f, "remote({})", user),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncState {
    /// No identity has been processed yet.
    Uninitialized,
    /// Loading records for an identity. Only observable while the load is
    /// in flight.
    LoadingForIdentity(Identity),
    Ready(Backend),
    /// A settled snapshot is waiting for its quiet period to elapse.
    SavingDebounced {
        pending: RecordState,
        backend: Backend,
        deadline: Instant,
    },
}

impl SyncState {
    /// The backend saves currently go to, if any.
    pub fn backend(&self) -> Option<&Backend> {
        match self {
            SyncState::Ready(backend) | SyncState::SavingDebounced { backend, .. } => Some(backend),
            SyncState::Uninitialized | SyncState::LoadingForIdentity(_) => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self {
            SyncState::SavingDebounced { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }
}

/// A light view of [`SyncState`] for readers, without the pending snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Uninitialized,
    Loading(Identity),
    Ready(Backend),
    SavePending(Backend),
}

impl From<&SyncState> for SyncStatus {
    fn from(state: &SyncState) -> Self {
        match state {
            SyncState::Uninitialized => SyncStatus::Uninitialized,
            SyncState::LoadingForIdentity(identity) => SyncStatus::Loading(identity.clone()),
            SyncState::Ready(backend) => SyncStatus::Ready(backend.clone()),
            SyncState::SavingDebounced { backend, .. } => SyncStatus::SavePending(backend.clone()),
        }
    }
}
