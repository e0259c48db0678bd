//! Defines the crate level error type.

use crate::transaction::TransactionType;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field of a new transaction was left empty.
    ///
    /// The title, amount and type must all be provided to create a
    /// transaction. Nothing is stored when this error is returned.
    #[error("Fill all fields: {0} is required")]
    MissingField(&'static str),

    /// The amount could not be read as a whole, non-negative number.
    ///
    /// Amounts are entered as a magnitude (e.g. "1,500") and signed according
    /// to the transaction type, so a leading minus sign is also rejected.
    #[error("\"{0}\" is not a valid amount, enter a whole number such as 1,500")]
    InvalidAmount(String),

    /// The transaction type was neither "income" nor "expense".
    #[error("\"{0}\" is not a valid transaction type, expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// The category does not belong to the categories of the transaction type.
    #[error("\"{category}\" is not a valid {transaction_type} category")]
    InvalidCategory {
        /// The category that was rejected.
        category: String,
        /// The type of the transaction that was being created.
        transaction_type: TransactionType,
    },

    /// A date string was not in the `YYYY-MM-DD` format.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A page size of zero was configured.
    #[error("the page size must be at least 1")]
    InvalidPageSize,

    /// The durable store, or an export file, could not be read or written.
    ///
    /// Callers should pass in the original error as a string.
    #[error("storage error: {0}")]
    StorageError(String),

    /// An error occurred while serializing a struct as JSON.
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),

    /// An error occurred while writing CSV data.
    #[error("could not write CSV: {0}")]
    CSVError(String),
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::CSVError(value.to_string())
    }
}

#[cfg(test)]
mod error_tests {
    use crate::transaction::TransactionType;

    use super::Error;

    #[test]
    fn missing_field_message_asks_to_fill_all_fields() {
        let message = Error::MissingField("title").to_string();

        assert!(message.starts_with("Fill all fields"), "got {message}");
    }

    #[test]
    fn invalid_category_names_the_type() {
        let error = Error::InvalidCategory {
            category: "Salary".to_owned(),
            transaction_type: TransactionType::Expense,
        };

        assert_eq!(
            error.to_string(),
            "\"Salary\" is not a valid expense category"
        );
    }

    #[test]
    fn storage_error_does_not_assume_a_write() {
        let error = Error::StorageError("could not read data.json: permission denied".to_owned());

        assert_eq!(
            error.to_string(),
            "storage error: could not read data.json: permission denied"
        );
    }
}
