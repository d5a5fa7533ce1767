//! Key-value storage backends.
//!
//! The reader state is stored as one string value under one key. Backends
//! only need to get and set whole values; there are no partial updates.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::Result;

/// String key-value storage.
///
/// Implementations are shared between the store and its background writer,
/// so they must be `Send + Sync`. Calls may block.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
