//! Local persistence for the webtoon reader state.
//!
//! The whole reader state is stored as one JSON document under a single
//! key of a string key-value backend.
//!
//! # Stored Format
//!
//! ```text
//! {"readHistory":[...],"subscribedSeries":[...],"coinsBalance":50,"favorites":[...]}
//! ```
//!
//! # Architecture
//!
//! - `backend/` - `KeyValueStore` trait with memory and file implementations
//! - `io.rs` - encode/decode and load/save helpers, sync and async
//! - `paths.rs` - platform data and config directories
//! - `error.rs` - Error types with user-friendly messages

mod backend;
mod error;
mod io;
mod paths;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use error::{PersistenceError, Result};
pub use io::{
    STATE_KEY, decode_state, encode_state, load_state, load_state_async, save_encoded_async,
    save_state,
};
pub use paths::{default_config_dir, default_data_dir};
