//! The reader state store.
//!
//! `UserStateStore` holds the authoritative in-memory `UserState`. Queries
//! read it directly. Commands compute the next state from the current one,
//! swap it in, and queue a full-record write for the background writer.
//! Persistence failures never reach the caller; they are logged and the
//! in-memory state stays the source of truth.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot, watch};
use toon_model::UserState;
use toon_persistence::{KeyValueStore, STATE_KEY};

use crate::command::{Command, replay};
use crate::writer::{self, Job};

/// Load progress of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    /// The stored record has not been read yet; queries answer from the seed state.
    Loading,
    /// The stored record (or the seed fallback) is live. Terminal.
    Ready,
}

struct Cell {
    phase: LoadPhase,
    state: UserState,
    /// Commands applied while loading, replayed over the loaded record.
    pending: Vec<Command>,
}

pub(crate) struct Shared {
    cell: Mutex<Cell>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Cell> {
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adopt the loaded record and switch to `Ready`.
    ///
    /// Returns the state to persist when commands arrived during loading.
    pub(crate) fn finish_loading(&self, loaded: Option<UserState>) -> Option<UserState> {
        let mut cell = self.lock();
        let pending = std::mem::take(&mut cell.pending);
        if let Some(loaded) = loaded {
            cell.state = replay(loaded, &pending);
        }
        cell.phase = LoadPhase::Ready;
        if pending.is_empty() {
            None
        } else {
            tracing::debug!(replayed = pending.len(), "Replayed commands issued while loading");
            Some(cell.state.clone())
        }
    }
}

/// Owner of the reader state.
///
/// Cloning yields another handle to the same state. The background writer
/// stops once every handle is dropped and the queued writes are applied.
#[derive(Clone)]
pub struct UserStateStore {
    shared: Arc<Shared>,
    jobs: mpsc::UnboundedSender<Job>,
    ready: watch::Receiver<bool>,
}

impl UserStateStore {
    /// Open a store over `backend` using the default key.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn open(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::open_with_key(backend, STATE_KEY)
    }

    /// Open a store over `backend`, storing the record under `key`.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    pub fn open_with_key(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self::open_on(&Handle::current(), backend, key)
    }

    /// Open a store whose writer runs on `handle`.
    pub fn open_on(
        handle: &Handle,
        backend: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        let shared = Arc::new(Shared {
            cell: Mutex::new(Cell {
                phase: LoadPhase::Loading,
                state: UserState::seed(),
                pending: Vec::new(),
            }),
        });
        let (jobs_tx, jobs_rx) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = watch::channel(false);
        handle.spawn(writer::run(
            backend,
            key.into(),
            Arc::clone(&shared),
            ready_tx,
            jobs_rx,
        ));
        Self {
            shared,
            jobs: jobs_tx,
            ready: ready_rx,
        }
    }

    /// Current load phase.
    pub fn phase(&self) -> LoadPhase {
        self.shared.lock().phase
    }

    /// True until the stored record has been read (or failed to read).
    pub fn is_loading(&self) -> bool {
        self.phase() == LoadPhase::Loading
    }

    /// Wait until the store leaves `Loading`.
    pub async fn wait_ready(&self) {
        let mut ready = self.ready.clone();
        if ready.wait_for(|ready| *ready).await.is_err() {
            tracing::warn!("Reader state writer exited before loading finished");
        }
    }

    /// Wait until every write issued so far has been applied or dropped.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.jobs.send(Job::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> UserState {
        self.shared.lock().state.clone()
    }

    /// Coins available to spend.
    pub fn coins_balance(&self) -> u32 {
        self.shared.lock().state.coins_balance()
    }

    /// Whether `episode_id` is in the read history.
    pub fn is_episode_read(&self, episode_id: &str) -> bool {
        self.shared.lock().state.has_read(episode_id)
    }

    /// Whether the reader follows `series_id`.
    pub fn is_series_subscribed(&self, series_id: &str) -> bool {
        self.shared.lock().state.is_subscribed(series_id)
    }

    /// Whether `series_id` is among the favorites.
    pub fn is_series_favorite(&self, series_id: &str) -> bool {
        self.shared.lock().state.is_favorite(series_id)
    }

    /// Add `episode_id` to the read history. Already-read episodes are a no-op.
    pub fn mark_as_read(&self, episode_id: &str) {
        self.execute(Command::MarkAsRead(episode_id.to_string()));
    }

    /// Follow `series_id`, or stop following it.
    pub fn toggle_subscription(&self, series_id: &str) {
        self.execute(Command::ToggleSubscription(series_id.to_string()));
    }

    /// Add `series_id` to the favorites, or remove it.
    pub fn toggle_favorite(&self, series_id: &str) {
        self.execute(Command::ToggleFavorite(series_id.to_string()));
    }

    fn execute(&self, command: Command) {
        // Held across the enqueue so write order matches state order.
        let mut cell = self.shared.lock();
        if cell.phase == LoadPhase::Loading {
            // Replayed over the loaded record even when it is a no-op on the seed.
            cell.pending.push(command.clone());
        }
        let Some(next) = command.apply(&cell.state) else {
            tracing::trace!(
                command = command.name(),
                id = command.target(),
                "Command left state unchanged"
            );
            return;
        };
        cell.state = next;
        tracing::debug!(
            command = command.name(),
            id = command.target(),
            phase = ?cell.phase,
            "Applied command"
        );
        if cell.phase == LoadPhase::Ready
            && self.jobs.send(Job::Persist(cell.state.clone())).is_err()
        {
            tracing::warn!("Reader state writer is gone; change kept in memory only");
        }
    }
}

impl std::fmt::Debug for UserStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cell = self.shared.lock();
        f.debug_struct("UserStateStore")
            .field("phase", &cell.phase)
            .field("state", &cell.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toon_persistence::{MemoryStore, decode_state, encode_state};

    fn shared(phase: LoadPhase) -> Shared {
        Shared {
            cell: Mutex::new(Cell {
                phase,
                state: UserState::seed(),
                pending: Vec::new(),
            }),
        }
    }

    #[test]
    fn finish_loading_without_pending_adopts_loaded() {
        let shared = shared(LoadPhase::Loading);
        let to_write = shared.finish_loading(Some(UserState::empty()));
        assert!(to_write.is_none());
        let cell = shared.lock();
        assert_eq!(cell.phase, LoadPhase::Ready);
        assert_eq!(cell.state, UserState::empty());
    }

    #[test]
    fn finish_loading_replays_pending_over_loaded() {
        let shared = shared(LoadPhase::Loading);
        shared
            .lock()
            .pending
            .push(Command::ToggleFavorite("s7".to_string()));
        let to_write = shared.finish_loading(Some(UserState::empty()));
        let expected = UserState::empty().with_favorite_toggled("s7");
        assert_eq!(to_write, Some(expected.clone()));
        assert_eq!(shared.lock().state, expected);
    }

    #[test]
    fn finish_loading_without_record_keeps_current() {
        let shared = shared(LoadPhase::Loading);
        shared.lock().state = UserState::seed().with_subscription_toggled("s4");
        shared
            .lock()
            .pending
            .push(Command::ToggleSubscription("s4".to_string()));
        let to_write = shared.finish_loading(None);
        assert_eq!(
            to_write,
            Some(UserState::seed().with_subscription_toggled("s4"))
        );
    }

    #[tokio::test]
    async fn commands_during_loading_do_not_clobber_stored_record() {
        let stored = UserState::empty().with_favorite_toggled("s8");
        let backend = Arc::new(MemoryStore::with_value(
            STATE_KEY,
            encode_state(&stored).unwrap(),
        ));

        let store = UserStateStore::open(backend.clone());
        // The writer task has not run yet on a current-thread runtime.
        assert!(store.is_loading());
        assert!(store.is_series_favorite("s1"));
        store.mark_as_read("s8_e1");

        store.wait_ready().await;
        store.flush().await;

        let state = store.snapshot();
        assert!(state.is_favorite("s8"));
        assert!(!state.is_favorite("s1"));
        assert!(state.has_read("s8_e1"));
        assert_eq!(backend.write_count(), 1);
        assert_eq!(backend.raw(STATE_KEY), Some(encode_state(&state).unwrap()));
    }

    #[tokio::test]
    async fn read_marked_during_loading_survives_load() {
        let backend = Arc::new(MemoryStore::with_value(
            STATE_KEY,
            encode_state(&UserState::empty()).unwrap(),
        ));

        let store = UserStateStore::open(backend.clone());
        assert!(store.is_loading());
        // Already read in the seed, but not in the stored record.
        assert!(store.is_episode_read("s1_e1"));
        store.mark_as_read("s1_e1");

        store.wait_ready().await;
        store.flush().await;

        assert!(store.is_episode_read("s1_e1"));
        assert_eq!(store.snapshot().read_history().len(), 1);
        let stored = decode_state(STATE_KEY, &backend.raw(STATE_KEY).unwrap()).unwrap();
        assert!(stored.has_read("s1_e1"));
        assert_eq!(backend.write_count(), 1);
    }
}
