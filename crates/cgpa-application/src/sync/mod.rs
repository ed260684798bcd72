//! Record synchronization.
//!
//! # Module Structure
//!
//! - `state`: `SyncState`, `Backend` and the published `SyncStatus`
//! - `policy`: the local-to-remote migration heuristic
//! - `controller`: `SyncController`, the state machine itself
//! - `handle`: the event loop and its cloneable `SyncHandle`

mod controller;
mod handle;
pub mod policy;
mod state;

pub use controller::SyncController;
pub use handle::{SyncEvent, SyncHandle, SyncSnapshot, run};
pub use state::{Backend, SyncState, SyncStatus};

/// Tracing target of every sync event.
pub(crate) const LOG_TARGET: &str = "cgpa::sync";
