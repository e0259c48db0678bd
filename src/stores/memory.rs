//! Implements an in-memory key-value store.

use std::collections::HashMap;

use crate::{Error, stores::KeyValueStore};

/// Keeps records in memory. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`.
    pub fn with_record(key: &str, value: &str) -> Self {
        let mut records = HashMap::new();
        records.insert(key.to_owned(), value.to_owned());

        Self { records }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.records.insert(key.to_owned(), value.to_owned());

        Ok(())
    }
}
