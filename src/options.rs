//! Derives the choices offered by the month and category filters.

use std::collections::HashSet;

use serde::Serialize;

use crate::transaction::Transaction;

/// The distinct months and categories present in the transaction collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// `YYYY-MM` months in the order they first appear.
    pub months: Vec<String>,
    /// Categories in the order they first appear.
    pub categories: Vec<String>,
}

/// Collect the filter options from the full, unfiltered collection.
///
/// Options must be derived again after every change to the collection so that
/// a month or category disappears once its last transaction is removed.
pub fn derive_filter_options(transactions: &[Transaction]) -> FilterOptions {
    let mut options = FilterOptions::default();
    let mut seen_months = HashSet::new();
    let mut seen_categories = HashSet::new();

    for transaction in transactions {
        let month = transaction.month();
        if seen_months.insert(month.clone()) {
            options.months.push(month);
        }

        if seen_categories.insert(transaction.category.as_str()) {
            options.categories.push(transaction.category.clone());
        }
    }

    options
}
