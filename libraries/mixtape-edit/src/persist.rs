//! Snapshot persistence for the edit session
//!
//! Every mutation flushes a full-playlist snapshot upstream. Snapshots are
//! drained by a single background worker in FIFO order, so persists for the
//! playlist under edit never interleave. Failures are reported on a watch
//! channel and do not roll back the in-memory state.

use async_trait::async_trait;
use mixtape_core::types::Playlist;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Upstream persistence collaborator for the edit session.
///
/// The client talks to the server through this seam; the server side
/// implements it over its playlist store.
#[async_trait]
pub trait PlaylistWriter: Send + Sync + 'static {
    /// Persist a full playlist snapshot
    async fn save_playlist(&self, playlist: &Playlist) -> mixtape_core::Result<()>;
}

/// FIFO write queue with a single drain worker
pub(crate) struct PersistQueue {
    tx: Option<mpsc::UnboundedSender<Playlist>>,
    worker: Option<JoinHandle<()>>,
    last_error: watch::Receiver<Option<String>>,
}

impl PersistQueue {
    /// Spawn the drain worker; requires a tokio runtime
    pub(crate) fn start(writer: Arc<dyn PlaylistWriter>) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<Playlist>();
        let (error_tx, error_rx) = watch::channel(None);

        let worker = tokio::spawn(async move {
            while let Some(snapshot) = rx.recv().await {
                if let Err(e) = writer.save_playlist(&snapshot).await {
                    tracing::error!(
                        playlist_id = %snapshot.id,
                        "Failed to persist playlist snapshot: {}",
                        e
                    );
                    let _ = error_tx.send(Some(e.to_string()));
                }
            }
        });

        Self {
            tx: Some(tx),
            worker: Some(worker),
            last_error: error_rx,
        }
    }

    /// Enqueue a snapshot for persistence
    pub(crate) fn enqueue(&self, snapshot: Playlist) {
        if let Some(tx) = &self.tx {
            // The worker only exits once the sender is dropped, so this
            // cannot fail while the queue is open.
            let _ = tx.send(snapshot);
        }
    }

    /// Most recent persist failure, if any
    pub(crate) fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Close the queue and wait for the worker to drain it
    pub(crate) async fn shutdown(mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.await;
        }
    }
}

impl Drop for PersistQueue {
    fn drop(&mut self) {
        // Dropping the sender lets the worker finish the remaining
        // snapshots and exit on its own.
        self.tx.take();
    }
}
