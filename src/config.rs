//! The settings needed to open a ledger.

use std::path::PathBuf;

use crate::{
    Error,
    pagination::{PageState, PaginationConfig},
    stores::{DEFAULT_STORAGE_KEY, FileStore, TransactionStore},
    timezone::get_local_offset,
};

/// The timezone used to pick the default date of new transactions.
pub const DEFAULT_TIMEZONE: &str = "Etc/UTC";

/// The config for a ledger kept on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// The directory that holds the transaction record.
    pub data_dir: PathBuf,
    /// The key (file stem) of the transaction record.
    pub storage_key: String,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub timezone: String,
    /// The config that controls how to display pages of data.
    pub pagination: PaginationConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            timezone: DEFAULT_TIMEZONE.to_owned(),
            pagination: PaginationConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Check that the config can be used.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidPageSize] if the page size is zero,
    /// - or [Error::InvalidTimezone] if the timezone is not recognised.
    pub fn validate(&self) -> Result<(), Error> {
        if self.pagination.default_page_size == 0 {
            return Err(Error::InvalidPageSize);
        }

        if get_local_offset(&self.timezone).is_none() {
            return Err(Error::InvalidTimezone(self.timezone.clone()));
        }

        Ok(())
    }

    /// Load the transactions from the data directory.
    pub fn open_store(&self) -> TransactionStore<FileStore> {
        TransactionStore::load(FileStore::new(&self.data_dir), &self.storage_key)
    }

    /// The initial page state.
    ///
    /// # Errors
    /// Returns [Error::InvalidPageSize] if the page size is zero.
    pub fn page_state(&self) -> Result<PageState, Error> {
        let mut page_state = PageState::new(self.pagination.default_page_size)?;
        page_state.go_to(self.pagination.default_page);

        Ok(page_state)
    }
}
