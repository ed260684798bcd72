//! Event loop around [`SyncController`] and the handle used to drive it.

use super::LOG_TARGET;
use super::controller::SyncController;
use super::state::SyncStatus;
use cgpa_core::error::{CgpaError, Result};
use cgpa_core::identity::Identity;
use cgpa_core::record::{Mutation, RecordModel};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::Instant;

const EVENT_BUFFER: usize = 64;

/// Inputs processed by the sync loop, strictly in arrival order.
#[derive(Debug)]
pub enum SyncEvent {
    IdentityChanged(Identity),
    Mutate(Mutation),
    /// Persist any pending snapshot now, then acknowledge.
    Flush(oneshot::Sender<()>),
    /// Flush, acknowledge and stop the loop.
    Shutdown(oneshot::Sender<()>),
}

/// What readers see after every processed event.
#[derive(Debug, Clone)]
pub struct SyncSnapshot {
    pub model: Arc<RecordModel>,
    pub status: SyncStatus,
}

impl SyncSnapshot {
    fn of(controller: &SyncController) -> Self {
        Self {
            model: Arc::new(controller.model().clone()),
            status: SyncStatus::from(controller.state()),
        }
    }
}

/// Cloneable front of a running sync loop.
#[derive(Clone)]
pub struct SyncHandle {
    events: mpsc::Sender<SyncEvent>,
    snapshots: watch::Receiver<SyncSnapshot>,
}

impl SyncHandle {
    /// Moves `controller` into a spawned event loop.
    pub fn spawn(controller: SyncController) -> (Self, JoinHandle<()>) {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        let (snapshot_tx, snapshot_rx) = watch::channel(SyncSnapshot::of(&controller));
        let task = tokio::spawn(run(controller, event_rx, snapshot_tx));
        (
            Self {
                events: event_tx,
                snapshots: snapshot_rx,
            },
            task,
        )
    }

    async fn send(&self, event: SyncEvent) -> Result<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| CgpaError::internal("Sync loop has stopped"))
    }

    pub async fn identity_changed(&self, identity: Identity) -> Result<()> {
        self.send(SyncEvent::IdentityChanged(identity)).await
    }

    pub async fn mutate(&self, mutation: Mutation) -> Result<()> {
        self.send(SyncEvent::Mutate(mutation)).await
    }

    /// Persists the pending snapshot, returning once it has been written.
    pub async fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(SyncEvent::Flush(ack_tx)).await?;
        ack_rx
            .await
            .map_err(|_| CgpaError::internal("Sync loop stopped before flushing"))
    }

    /// Flushes and stops the loop.
    pub async fn shutdown(&self) -> Result<()> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.send(SyncEvent::Shutdown(ack_tx)).await?;
        ack_rx
            .await
            .map_err(|_| CgpaError::internal("Sync loop stopped before shutting down"))
    }

    pub fn subscribe(&self) -> watch::Receiver<SyncSnapshot> {
        self.snapshots.clone()
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> SyncSnapshot {
        self.snapshots.borrow().clone()
    }
}

enum Step {
    Event(Option<SyncEvent>),
    DeadlineElapsed,
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Runs the controller until shutdown or until every handle is dropped.
///
/// Identity changes are awaited inline, so events that arrive meanwhile
/// queue behind the load and see its result. Dropping every sender flushes
/// before the loop ends.
pub async fn run(
    mut controller: SyncController,
    mut events: mpsc::Receiver<SyncEvent>,
    snapshots: watch::Sender<SyncSnapshot>,
) {
    tracing::debug!(target: LOG_TARGET, "Sync loop started");

    loop {
        let step = tokio::select! {
            event = events.recv() => Step::Event(event),
            _ = sleep_until(controller.deadline()) => Step::DeadlineElapsed,
        };

        let (stop, ack) = match step {
            Step::DeadlineElapsed => {
                controller.flush().await;
                (false, None)
            }
            Step::Event(Some(SyncEvent::IdentityChanged(identity))) => {
                controller.handle_identity_change(identity).await;
                (false, None)
            }
            Step::Event(Some(SyncEvent::Mutate(mutation))) => {
                controller.apply(&mutation);
                (false, None)
            }
            Step::Event(Some(SyncEvent::Flush(ack))) => {
                controller.flush().await;
                (false, Some(ack))
            }
            Step::Event(Some(SyncEvent::Shutdown(ack))) => {
                controller.flush().await;
                (true, Some(ack))
            }
            Step::Event(None) => {
                controller.flush().await;
                (true, None)
            }
        };

        snapshots.send_replace(SyncSnapshot::of(&controller));
        if let Some(ack) = ack {
            let _ = ack.send(());
        }
        if stop {
            break;
        }
    }

    tracing::debug!(target: LOG_TARGET, "Sync loop stopped");
}
