//! Behaviour of the reader state store against real and failing backends.

use std::sync::Arc;

use tempfile::tempdir;
use toon_model::UserState;
use toon_persistence::{FileStore, MemoryStore, STATE_KEY, decode_state, encode_state};
use toon_state::{LoadPhase, UserStateStore};

async fn ready_store(backend: Arc<MemoryStore>) -> UserStateStore {
    let store = UserStateStore::open(backend);
    store.wait_ready().await;
    store
}

#[tokio::test]
async fn fresh_install_uses_seed_state() {
    let backend = Arc::new(MemoryStore::new());
    let store = ready_store(backend.clone()).await;

    assert_eq!(store.phase(), LoadPhase::Ready);
    assert!(!store.is_loading());
    assert!(store.is_episode_read("s1_e1"));
    assert!(!store.is_episode_read("s3_e1"));
    assert!(!store.is_series_favorite("s2"));
    assert!(!store.is_series_subscribed("s3"));
    assert_eq!(store.coins_balance(), 50);
    assert_eq!(store.snapshot(), UserState::seed());

    store.flush().await;
    assert_eq!(backend.write_count(), 0);
}

#[tokio::test]
async fn mark_as_read_is_idempotent() {
    let backend = Arc::new(MemoryStore::new());
    let store = ready_store(backend.clone()).await;
    let before = store.snapshot().read_history().len();

    assert!(!store.is_episode_read("s3_e1"));
    store.mark_as_read("s3_e1");
    assert!(store.is_episode_read("s3_e1"));
    assert_eq!(store.snapshot().read_history().len(), before + 1);

    store.mark_as_read("s3_e1");
    store.mark_as_read("s3_e1");
    assert!(store.is_episode_read("s3_e1"));
    assert_eq!(store.snapshot().read_history().len(), before + 1);

    store.flush().await;
    assert_eq!(backend.write_count(), 1);
}

#[tokio::test]
async fn toggles_are_involutions_without_cross_talk() {
    let backend = Arc::new(MemoryStore::new());
    let store = ready_store(backend).await;

    store.toggle_subscription("s3");
    assert!(store.is_series_subscribed("s3"));
    assert!(store.is_series_favorite("s3"));
    store.toggle_subscription("s3");
    assert!(!store.is_series_subscribed("s3"));
    assert!(store.is_series_favorite("s3"));

    store.toggle_favorite("s2");
    assert!(store.is_series_favorite("s2"));
    assert!(store.is_series_subscribed("s2"));
    store.toggle_favorite("s2");
    assert!(!store.is_series_favorite("s2"));
    assert!(store.is_series_subscribed("s2"));

    assert_eq!(store.snapshot(), UserState::seed());
}

#[tokio::test]
async fn persisted_value_follows_last_command() {
    let backend = Arc::new(MemoryStore::new());
    let store = ready_store(backend.clone()).await;

    for id in ["s4", "s5", "s6", "s4"] {
        store.toggle_subscription(id);
    }
    store.mark_as_read("s5_e1");
    store.flush().await;

    let raw = backend.raw(STATE_KEY).expect("state was written");
    assert_eq!(decode_state(STATE_KEY, &raw).unwrap(), store.snapshot());
}

#[tokio::test]
async fn toggling_back_to_stored_value_skips_write() {
    let backend = Arc::new(MemoryStore::new());
    let store = ready_store(backend.clone()).await;

    store.toggle_favorite("s9");
    store.flush().await;
    assert_eq!(backend.write_count(), 1);

    store.toggle_favorite("s9");
    store.toggle_favorite("s9");
    store.flush().await;
    // Both queued records coalesce into the one already stored.
    assert_eq!(backend.write_count(), 1);
    assert!(store.is_series_favorite("s9"));
}

#[tokio::test]
async fn unreadable_record_falls_back_to_seed() {
    let backend = Arc::new(MemoryStore::with_value(STATE_KEY, "{\"readHistory\": 3"));
    let store = ready_store(backend.clone()).await;
    assert_eq!(store.snapshot(), UserState::seed());

    store.toggle_favorite("s4");
    assert!(store.is_series_favorite("s4"));
    store.flush().await;
    assert_eq!(backend.write_count(), 1);
}

#[tokio::test]
async fn backend_failures_are_silent() {
    let backend = Arc::new(MemoryStore::new());
    backend.set_fail_reads(true);
    backend.set_fail_writes(true);
    let store = ready_store(backend.clone()).await;
    assert_eq!(store.snapshot(), UserState::seed());

    store.mark_as_read("s7_e1");
    store.toggle_subscription("s7");
    store.flush().await;

    assert!(store.is_episode_read("s7_e1"));
    assert!(store.is_series_subscribed("s7"));
    assert_eq!(backend.write_count(), 0);

    // Once the backend recovers, the next change writes the full record.
    backend.set_fail_writes(false);
    store.toggle_favorite("s7");
    store.flush().await;
    let raw = backend.raw(STATE_KEY).expect("state was written");
    let stored = decode_state(STATE_KEY, &raw).unwrap();
    assert!(stored.has_read("s7_e1"));
    assert!(stored.is_subscribed("s7"));
    assert!(stored.is_favorite("s7"));
}

#[tokio::test]
async fn reopening_reproduces_state() {
    let dir = tempdir().unwrap();
    let expected = {
        let store = UserStateStore::open(Arc::new(FileStore::new(dir.path())));
        store.wait_ready().await;
        store.mark_as_read("s1_e3");
        store.toggle_subscription("s1");
        store.toggle_favorite("s5");
        store.flush().await;
        store.snapshot()
    };

    let reopened = UserStateStore::open(Arc::new(FileStore::new(dir.path())));
    reopened.wait_ready().await;
    assert_eq!(reopened.snapshot(), expected);
    assert!(reopened.is_episode_read("s1_e3"));
    assert!(!reopened.is_series_subscribed("s1"));
    assert!(reopened.is_series_favorite("s5"));
}

#[tokio::test]
async fn clones_share_state() {
    let backend = Arc::new(MemoryStore::new());
    let store = ready_store(backend).await;
    let other = store.clone();

    other.toggle_subscription("s8");
    assert!(store.is_series_subscribed("s8"));
}

#[tokio::test]
async fn custom_key_is_used() {
    let backend = Arc::new(MemoryStore::with_value(
        "profile_2",
        encode_state(&UserState::empty()).unwrap(),
    ));
    let store = UserStateStore::open_with_key(backend.clone(), "profile_2");
    store.wait_ready().await;
    assert_eq!(store.snapshot(), UserState::empty());

    store.mark_as_read("s2_e2");
    store.flush().await;
    assert!(backend.raw(STATE_KEY).is_none());
    assert!(backend.raw("profile_2").is_some());
}

#[test]
fn store_opens_on_explicit_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()
        .unwrap();
    let backend = Arc::new(MemoryStore::new());
    let store = UserStateStore::open_on(runtime.handle(), backend.clone(), STATE_KEY);

    runtime.block_on(async {
        store.wait_ready().await;
        store.toggle_favorite("s6");
        store.flush().await;
    });
    assert_eq!(backend.write_count(), 1);
}
