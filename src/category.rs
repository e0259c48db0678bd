//! The fixed sets of categories a new transaction can be filed under.
//!
//! Categories are only checked when a transaction is created. Once stored, a
//! category is plain text and is not checked again when the store is loaded.

use crate::{Error, transaction::TransactionType};

/// The categories available for income.
pub const INCOME_CATEGORIES: [&str; 4] = ["Salary", "Freelance", "Business", "Other Income"];

/// The categories available for expenses.
pub const EXPENSE_CATEGORIES: [&str; 6] = [
    "Food",
    "Travel",
    "Rent",
    "Shopping",
    "Bills",
    "Other Expense",
];

/// Get the categories that can be chosen for `transaction_type`.
pub fn categories_for(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Income => &INCOME_CATEGORIES,
        TransactionType::Expense => &EXPENSE_CATEGORIES,
    }
}

/// The category used when a new transaction does not specify one.
pub fn default_category(transaction_type: TransactionType) -> &'static str {
    categories_for(transaction_type)[0]
}

/// Check that `category` belongs to the categories of `transaction_type`.
///
/// The comparison is exact, "food" is not the same category as "Food".
///
/// # Errors
/// Returns [Error::InvalidCategory] if `category` is not in the set.
pub fn validate_category(category: &str, transaction_type: TransactionType) -> Result<(), Error> {
    if categories_for(transaction_type).contains(&category) {
        Ok(())
    } else {
        Err(Error::InvalidCategory {
            category: category.to_owned(),
            transaction_type,
        })
    }
}
