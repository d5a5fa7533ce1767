//! Loading and saving the reader state through a backend.

use std::sync::Arc;

use toon_model::UserState;

use crate::backend::KeyValueStore;
use crate::error::{PersistenceError, Result};

/// Key the reader state is stored under.
pub const STATE_KEY: &str = "webtoon_user_state";

/// Serialize a state to its stored JSON form.
pub fn encode_state(state: &UserState) -> Result<String> {
    serde_json::to_string(state).map_err(|source| PersistenceError::Serialization { source })
}

/// Parse a stored value. Missing fields or wrong types are errors.
pub fn decode_state(key: &str, raw: &str) -> Result<UserState> {
    serde_json::from_str(raw).map_err(|source| PersistenceError::Deserialization {
        key: key.to_string(),
        source,
    })
}

/// Load the state stored under `key`.
///
/// Returns `Ok(None)` when nothing has been stored yet.
pub fn load_state(backend: &dyn KeyValueStore, key: &str) -> Result<Option<UserState>> {
    let Some(raw) = backend.get(key)? else {
        return Ok(None);
    };
    let state = decode_state(key, &raw)?;
    tracing::debug!(
        key,
        read = state.read_history().len(),
        subscribed = state.subscribed_series().len(),
        favorites = state.favorites().len(),
        "Loaded reader state"
    );
    Ok(Some(state))
}

/// Store `state` under `key`, replacing any previous value.
pub fn save_state(backend: &dyn KeyValueStore, key: &str, state: &UserState) -> Result<()> {
    let encoded = encode_state(state)?;
    backend.set(key, &encoded)
}

/// Load the state on the blocking thread pool.
pub async fn load_state_async(
    backend: Arc<dyn KeyValueStore>,
    key: String,
) -> Result<Option<UserState>> {
    tokio::task::spawn_blocking(move || load_state(backend.as_ref(), &key))
        .await
        .map_err(|source| PersistenceError::TaskFailed { source })?
}

/// Write an already encoded state on the blocking thread pool.
pub async fn save_encoded_async(
    backend: Arc<dyn KeyValueStore>,
    key: String,
    encoded: String,
) -> Result<()> {
    tokio::task::spawn_blocking(move || backend.set(&key, &encoded))
        .await
        .map_err(|source| PersistenceError::TaskFailed { source })?
}
