//! Application layer for the CGPA record keeper.
//!
//! Coordinates the record model with the local and remote stores: which
//! backend is authoritative for the current identity, one-time migration of
//! local data, and debounced persistence of settled mutations.

pub mod sync;

pub use sync::{Backend, SyncState, SyncStatus};
pub use sync::{SyncController, SyncEvent, SyncHandle, SyncSnapshot};
