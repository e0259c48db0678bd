//! Formatting used where amounts and dates are shown to the user.
//!
//! Amounts are stored as signed whole rupees. Signs are turned into labels
//! (income/expense) or dropped only here, at the display boundary.

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// The format dates are displayed in, e.g. "01 May 2024".
pub const DISPLAY_DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day] [month repr:short] [year]");

/// Format `date` for display, e.g. "01 May 2024".
pub fn format_date(date: Date) -> String {
    date.format(DISPLAY_DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Format `amount` as rupees with Indian digit grouping, e.g. "₹1,23,456" or "-₹150".
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };

    format!("{sign}₹{}", group_indian(amount.unsigned_abs()))
}

/// Group the digits of `value` the way Indian amounts are written: the last
/// three digits together, then pairs. 1234567 becomes "12,34,567".
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);

    for (index, digit) in head.chars().enumerate() {
        if index > 0 && (head.len() - index) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

/// Format the expense total of a summary, which is stored as a negative number,
/// as a positive amount.
pub fn format_expense_total(expenses: i64) -> String {
    format_currency(expenses.saturating_abs())
}

/// Format the amount of a single transaction without its sign. The sign is
/// shown by the type column instead.
pub fn format_amount(amount: i64) -> String {
    format_currency(amount.saturating_abs())
}
