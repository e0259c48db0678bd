//! Defines the store that owns the transaction collection.

use std::collections::HashSet;

use crate::{
    Error,
    stores::KeyValueStore,
    transaction::{Transaction, TransactionId},
};

/// The key the transaction collection is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "data";

/// Owns the transactions and keeps them in sync with a durable [KeyValueStore].
///
/// Transactions are kept in insertion order. The whole collection is written
/// to the backend after every change, there are no partial updates.
#[derive(Debug)]
pub struct TransactionStore<S> {
    backend: S,
    key: String,
    transactions: Vec<Transaction>,
}

impl<S: KeyValueStore> TransactionStore<S> {
    /// Load the transactions stored under `key` in `backend`.
    ///
    /// A missing, unreadable or malformed record gives an empty collection
    /// instead of an error. If the record contains the same ID more than once
    /// only the first of those transactions is kept.
    pub fn load(backend: S, key: &str) -> Self {
        let transactions = match backend.get(key) {
            Ok(Some(text)) => match serde_json::from_str::<Vec<Transaction>>(&text) {
                Ok(transactions) => dedup_ids(transactions),
                Err(error) => {
                    tracing::warn!("Stored transactions could not be parsed, starting empty: {error}");
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::debug!("No transactions stored under \"{key}\", starting empty");
                Vec::new()
            }
            Err(error) => {
                tracing::warn!("Stored transactions could not be read, starting empty: {error}");
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} transactions", transactions.len());

        Self {
            backend,
            key: key.to_owned(),
            transactions,
        }
    }

    /// Append `transaction` to the collection and persist the collection.
    ///
    /// The caller must make sure the ID is not already in use.
    ///
    /// # Errors
    /// Returns [Error::StorageError] or [Error::JSONSerializationError] if the
    /// collection could not be persisted. The collection is left unchanged in
    /// that case.
    pub fn add(&mut self, transaction: Transaction) -> Result<(), Error> {
        let id = transaction.id;
        self.transactions.push(transaction);

        if let Err(error) = self.persist() {
            self.transactions.pop();
            return Err(error);
        }

        tracing::info!("Added transaction {id}");

        Ok(())
    }

    /// Remove the transaction with `id` and persist the collection.
    ///
    /// Removing an ID that is not in the collection changes nothing and is not
    /// an error.
    ///
    /// # Errors
    /// Returns [Error::StorageError] or [Error::JSONSerializationError] if the
    /// collection could not be persisted. The collection is left unchanged in
    /// that case.
    pub fn remove(&mut self, id: TransactionId) -> Result<(), Error> {
        let Some(index) = self.transactions.iter().position(|t| t.id == id) else {
            tracing::debug!("Tried to remove transaction {id}, which does not exist");
            return self.persist();
        };

        let removed = self.transactions.remove(index);

        if let Err(error) = self.persist() {
            self.transactions.insert(index, removed);
            return Err(error);
        }

        tracing::info!("Removed transaction {id}");

        Ok(())
    }

    /// All transactions in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The durable backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn persist(&mut self) -> Result<(), Error> {
        let text = serde_json::to_string(&self.transactions)?;

        self.backend.set(&self.key, &text)
    }
}

fn dedup_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    let count = transactions.len();

    let unique: Vec<Transaction> = transactions
        .into_iter()
        .filter(|transaction| seen.insert(transaction.id))
        .collect();

    if unique.len() != count {
        tracing::warn!(
            "Dropped {} stored transactions with duplicate IDs",
            count - unique.len()
        );
    }

    unique
}
