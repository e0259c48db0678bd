//! Filters the transaction collection by search text, type, category and month.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, transaction::Transaction};

/// The value that selects every option of a criterion.
pub const ALL: &str = "all";

/// Restricts transactions by the sign of their amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Keep every transaction.
    #[default]
    All,
    /// Keep transactions with a positive amount.
    Income,
    /// Keep transactions with a negative amount.
    Expense,
}

impl TypeFilter {
    fn matches(self, amount: i64) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => amount > 0,
            TypeFilter::Expense => amount < 0,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => write!(f, "all"),
            TypeFilter::Income => write!(f, "income"),
            TypeFilter::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | ALL => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            _ => Err(Error::InvalidTransactionType(s.to_owned())),
        }
    }
}

/// The criteria a transaction must meet to be shown.
///
/// A `None` category or month selects all categories or months.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Text that must appear in the title, ignoring case. Empty matches everything.
    pub search_text: String,
    /// The kind of transaction to keep.
    #[serde(rename = "type")]
    pub transaction_type: TypeFilter,
    /// The exact category to keep.
    pub category: Option<String>,
    /// The `YYYY-MM` month to keep.
    pub month: Option<String>,
}

impl FilterCriteria {
    /// Criteria that keep every transaction.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether `transaction` meets every criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        let search_text = self.search_text.to_lowercase();

        self.matches_with_search(transaction, &search_text)
    }

    fn matches_with_search(&self, transaction: &Transaction, lowercase_search: &str) -> bool {
        transaction.title.to_lowercase().contains(lowercase_search)
            && self.transaction_type.matches(transaction.amount)
            && self
                .category
                .as_ref()
                .is_none_or(|category| *category == transaction.category)
            && self
                .month
                .as_ref()
                .is_none_or(|month| *month == transaction.month())
    }
}

/// Interpret a selector value where "all" (or nothing) selects every option.
pub fn parse_selection(value: &str) -> Option<String> {
    let value = value.trim();

    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Get the transactions that meet `criteria`, keeping their original order.
pub fn apply_filter<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
) -> Vec<&'a Transaction> {
    let search_text = criteria.search_text.to_lowercase();

    transactions
        .iter()
        .filter(|transaction| criteria.matches_with_search(transaction, &search_text))
        .collect()
}
