//! Reader state store for the webtoon reader.
//!
//! [`UserStateStore`] owns the single [`UserState`](toon_model::UserState)
//! of an installation. It loads the stored record once at startup, answers
//! queries from memory, and writes the whole record back after every
//! change through a single background writer.
//!
//! ```ignore
//! use std::sync::Arc;
//! use toon_persistence::FileStore;
//! use toon_state::UserStateStore;
//!
//! let store = UserStateStore::open(Arc::new(FileStore::new(data_dir)));
//! store.wait_ready().await;
//! store.toggle_subscription("s4");
//! store.flush().await;
//! ```

mod command;
mod library;
mod store;
mod writer;

pub use library::{Library, ShelfFilter};
pub use store::{LoadPhase, UserStateStore};
