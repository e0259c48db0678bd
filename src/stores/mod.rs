//! Contains the durable storage backends and the [TransactionStore] that owns the
//! transaction collection.

mod file;
mod memory;
mod transaction;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use transaction::{DEFAULT_STORAGE_KEY, TransactionStore};

use crate::Error;

/// A durable store of keyed text records.
///
/// Each key holds one record that is replaced in full on every write.
pub trait KeyValueStore {
    /// Read the record stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Replace the record stored under `key` with `value`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}
