//! Transactions, the records at the centre of the ledger.
//!
//! This module contains:
//! - The `Transaction` model and its `TransactionType`
//! - `TransactionForm`, the raw user submission, and `TransactionBuilder`,
//!   which turns a validated submission into a `Transaction`
//! - ID assignment for new transactions

use std::{collections::HashSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    category::{default_category, validate_category},
};

/// Alias for the integer type used to identify transactions.
///
/// New IDs are the creation time in milliseconds since the Unix epoch.
pub type TransactionId = i64;

/// The format of transaction dates, e.g. "2024-05-01".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never changed after they are created. To create a new
/// `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// A short description of what the transaction was for.
    pub title: String,
    /// The amount of money earned (positive) or spent (negative), in whole
    /// currency units.
    pub amount: i64,
    /// The category the transaction was filed under.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(title: &str, amount: i64, transaction_type: TransactionType) -> TransactionBuilder {
        TransactionBuilder::new(title, amount, transaction_type)
    }

    /// Whether money was earned or spent, derived from the sign of the amount.
    ///
    /// An amount of zero is reported as an expense.
    pub fn transaction_type(&self) -> TransactionType {
        TransactionType::of_amount(self.amount)
    }

    /// The `YYYY-MM` prefix of the transaction date.
    pub fn month(&self) -> String {
        month_key(self.date)
    }
}

/// Format the `YYYY-MM` prefix of `date`.
pub fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// Whether a transaction records money earned or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, stored with a positive amount.
    Income,
    /// Money spent, stored with a negative amount.
    Expense,
}

impl TransactionType {
    /// Classify `amount` by its sign.
    pub fn of_amount(amount: i64) -> Self {
        if amount > 0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    /// Give `magnitude` the sign used to store amounts of this type.
    pub fn signed(self, magnitude: i64) -> i64 {
        match self {
            TransactionType::Income => magnitude,
            TransactionType::Expense => -magnitude,
        }
    }

    /// The capitalised name shown in tables and exports.
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(Error::InvalidTransactionType(s.to_owned())),
        }
    }
}

// ============================================================================
// CREATION
// ============================================================================

/// The raw fields of a new transaction, as entered by the user.
///
/// Use [TransactionForm::validate] to check the fields and get a
/// [TransactionBuilder].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionForm {
    /// The title of the transaction.
    pub title: String,
    /// The magnitude of the amount, optionally with thousands separators, e.g. "1,500".
    pub amount: String,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: String,
    /// The category, defaults to the first category of the type.
    pub category: Option<String>,
    /// The date in `YYYY-MM-DD` format, defaults to today.
    pub date: Option<String>,
}

impl TransactionForm {
    /// Check the submitted fields and convert them into a [TransactionBuilder].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if the title, amount or type is empty,
    /// - [Error::InvalidAmount] if the amount is not a whole, non-negative number,
    /// - [Error::InvalidTransactionType] if the type is not "income" or "expense",
    /// - or [Error::InvalidDate] if a date was given that is not `YYYY-MM-DD`.
    pub fn validate(&self) -> Result<TransactionBuilder, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::MissingField("title"));
        }

        if self.amount.trim().is_empty() {
            return Err(Error::MissingField("amount"));
        }

        if self.transaction_type.trim().is_empty() {
            return Err(Error::MissingField("type"));
        }

        let transaction_type: TransactionType = self.transaction_type.parse()?;
        let magnitude = parse_amount(&self.amount)?;

        let mut builder = TransactionBuilder::new(&self.title, magnitude, transaction_type);

        if let Some(category) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            builder = builder.category(category);
        }

        if let Some(date) = self.date.as_deref().filter(|d| !d.trim().is_empty()) {
            builder = builder.date(parse_date(date)?);
        }

        Ok(builder)
    }
}

/// Parse the magnitude of an amount such as "1,500".
///
/// Thousands separators are ignored. The result is never negative.
///
/// # Errors
/// Returns [Error::InvalidAmount] if `text` contains anything other than
/// digits and commas, or if the number is too large.
pub fn parse_amount(text: &str) -> Result<i64, Error> {
    let digits: String = text.trim().chars().filter(|c| *c != ',').collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::InvalidAmount(text.to_owned()));
    }

    digits
        .parse()
        .map_err(|_| Error::InvalidAmount(text.to_owned()))
}

/// Parse a date in the `YYYY-MM-DD` format.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// A builder for creating [Transaction] instances.
///
/// The amount is given as a magnitude and the sign is taken from the
/// transaction type when the builder is finalized. The category defaults to
/// the first category of the type and the date defaults to the date passed to
/// [TransactionBuilder::finalize].
///
/// # Examples
///
/// ```rust
/// use time::macros::date;
///
/// use spendbook::transaction::{Transaction, TransactionType};
///
/// let transaction = Transaction::build("Coffee", 150, TransactionType::Expense)
///     .category("Food")
///     .date(date!(2024 - 05 - 01))
///     .finalize(1, date!(2024 - 05 - 02))
///     .unwrap();
///
/// assert_eq!(transaction.amount, -150);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    title: String,
    magnitude: i64,
    transaction_type: TransactionType,
    category: Option<String>,
    date: Option<Date>,
}

impl TransactionBuilder {
    /// Create a builder for a transaction of `transaction_type`.
    ///
    /// `magnitude` is the unsigned size of the amount, its sign is ignored.
    pub fn new(title: &str, magnitude: i64, transaction_type: TransactionType) -> Self {
        Self {
            title: title.to_owned(),
            magnitude: magnitude.saturating_abs(),
            transaction_type,
            category: None,
            date: None,
        }
    }

    /// Set the category for the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_owned());
        self
    }

    /// Set the date for the transaction.
    pub fn date(mut self, date: Date) -> Self {
        self.date = Some(date);
        self
    }

    /// Build the final [Transaction] instance.
    ///
    /// `today` is used as the date when none was set.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if the title is empty,
    /// - or [Error::InvalidCategory] if the category does not belong to the type.
    pub fn finalize(self, id: TransactionId, today: Date) -> Result<Transaction, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::MissingField("title"));
        }

        let category = match self.category {
            Some(category) => {
                validate_category(&category, self.transaction_type)?;
                category
            }
            None => default_category(self.transaction_type).to_owned(),
        };

        Ok(Transaction {
            id,
            title: self.title,
            amount: self.transaction_type.signed(self.magnitude),
            category,
            date: self.date.unwrap_or(today),
        })
    }
}

/// Pick the ID for a transaction created at `now`.
///
/// IDs are creation timestamps in milliseconds. If a transaction with the same
/// or a later timestamp already exists, the ID after the largest existing ID is
/// used instead so that IDs stay unique and increasing.
///
/// When the largest existing ID is `TransactionId::MAX` there is no later ID,
/// so the smallest unused ID from the timestamp onwards is used. IDs stay
/// unique but are no longer increasing in that case.
pub fn next_transaction_id(now: OffsetDateTime, existing: &[Transaction]) -> TransactionId {
    let timestamp = (now.unix_timestamp_nanos() / 1_000_000) as TransactionId;

    match existing.iter().map(|transaction| transaction.id).max() {
        Some(largest) if largest >= timestamp => largest
            .checked_add(1)
            .unwrap_or_else(|| first_unused_id(timestamp, existing)),
        _ => timestamp,
    }
}

fn first_unused_id(from: TransactionId, existing: &[Transaction]) -> TransactionId {
    let used: HashSet<TransactionId> = existing
        .iter()
        .map(|transaction| transaction.id)
        .collect();

    // A collection can never hold every ID in the range, so a gap always exists.
    (from..=TransactionId::MAX)
        .find(|id| !used.contains(id))
        .unwrap_or(from)
}

// ============================================================================
// TESTS
// ============================================================================
