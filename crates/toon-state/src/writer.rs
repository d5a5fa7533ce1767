//! Background persistence task.
//!
//! One task per store. It loads the stored record first, then applies
//! queued writes one at a time in the order they were issued, so the
//! stored value always converges to the latest in-memory state. Every write
//! is a full record, so when several are waiting only the newest is written.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use toon_model::UserState;
use toon_persistence::{KeyValueStore, encode_state, load_state_async, save_encoded_async};

use crate::store::Shared;

/// Work item for the writer.
#[derive(Debug)]
pub(crate) enum Job {
    /// Persist this state, replacing the stored record.
    Persist(UserState),
    /// Signal once every job queued before this one has been handled.
    Flush(oneshot::Sender<()>),
}

struct Writer {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    /// Payload of the last successful write (or of the loaded record).
    last_written: Option<String>,
}

impl Writer {
    async fn persist(&mut self, state: &UserState) {
        let encoded = match encode_state(state) {
            Ok(encoded) => encoded,
            Err(error) => {
                tracing::warn!(%error, "Dropping reader state write");
                return;
            }
        };
        if self.last_written.as_deref() == Some(encoded.as_str()) {
            tracing::trace!(key = %self.key, "Stored state already current, skipping write");
            return;
        }
        match save_encoded_async(Arc::clone(&self.backend), self.key.clone(), encoded.clone()).await
        {
            Ok(()) => {
                tracing::debug!(key = %self.key, bytes = encoded.len(), "Saved reader state");
                self.last_written = Some(encoded);
            }
            Err(error) => {
                tracing::warn!(
                    key = %self.key,
                    %error,
                    "Failed to save reader state; keeping in-memory copy"
                );
            }
        }
    }
}

pub(crate) async fn run(
    backend: Arc<dyn KeyValueStore>,
    key: String,
    shared: Arc<Shared>,
    ready: watch::Sender<bool>,
    mut jobs: mpsc::UnboundedReceiver<Job>,
) {
    let loaded = match load_state_async(Arc::clone(&backend), key.clone()).await {
        Ok(Some(state)) => {
            tracing::info!(key = %key, "Loaded stored reader state");
            Some(state)
        }
        Ok(None) => {
            tracing::info!(key = %key, "No stored reader state, using defaults");
            None
        }
        Err(error) => {
            tracing::warn!(key = %key, %error, "Failed to load reader state, using defaults");
            None
        }
    };

    let last_written = loaded
        .as_ref()
        .and_then(|state| encode_state(state).ok());
    let merged = shared.finish_loading(loaded);
    ready.send_replace(true);

    let mut writer = Writer {
        backend,
        key,
        last_written,
    };
    if let Some(state) = merged {
        writer.persist(&state).await;
    }

    while let Some(job) = jobs.recv().await {
        match job {
            Job::Persist(mut state) => {
                let mut flushes = Vec::new();
                while let Ok(queued) = jobs.try_recv() {
                    match queued {
                        Job::Persist(newer) => state = newer,
                        Job::Flush(done) => flushes.push(done),
                    }
                }
                writer.persist(&state).await;
                for done in flushes {
                    let _ = done.send(());
                }
            }
            Job::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    tracing::debug!(key = %writer.key, "Reader state writer stopped");
}
