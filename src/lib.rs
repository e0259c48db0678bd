//! Spendbook records small income and expense transactions and derives
//! filtered, paginated and summarized views of them.
//!
//! The [Ledger] owns a [TransactionStore] and re-runs the whole view pipeline
//! after every change: persist, derive filter options, filter, summarize,
//! paginate and present.
//!
//! ```rust
//! use spendbook::{
//!     Ledger, NoopPresenter, PageState, TransactionForm,
//!     stores::{DEFAULT_STORAGE_KEY, MemoryStore, TransactionStore},
//! };
//! use time::macros::date;
//!
//! let store = TransactionStore::load(MemoryStore::new(), DEFAULT_STORAGE_KEY);
//! let mut ledger = Ledger::new(store, PageState::new(5).unwrap(), NoopPresenter);
//!
//! let form = TransactionForm {
//!     title: "Coffee".to_owned(),
//!     amount: "150".to_owned(),
//!     transaction_type: "expense".to_owned(),
//!     ..Default::default()
//! };
//! let view = ledger.add(&form, date!(2024 - 05 - 01)).unwrap();
//!
//! assert_eq!(view.summary.expenses, -150);
//! ```

#![warn(missing_docs)]

pub mod category;
pub mod config;
pub mod display;
pub mod export;
pub mod filter;
pub mod ledger;
pub mod logging;
pub mod options;
pub mod pagination;
pub mod stores;
pub mod summary;
pub mod terminal;
pub mod timezone;
pub mod transaction;

mod error;

pub use config::LedgerConfig;
pub use error::Error;
pub use filter::{FilterCriteria, TypeFilter, apply_filter};
pub use ledger::{Ledger, LedgerView, NoopPresenter, Presenter};
pub use options::{FilterOptions, derive_filter_options};
pub use pagination::{Page, PageState, PaginationConfig, paginate};
pub use stores::{FileStore, KeyValueStore, MemoryStore, TransactionStore};
pub use summary::{CategoryTotal, TransactionSummary, summarize};
pub use transaction::{Transaction, TransactionForm, TransactionId, TransactionType};
