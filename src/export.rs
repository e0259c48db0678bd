//! Exports the transaction collection as CSV.

use std::io::Write;

use crate::{Error, display::format_date, transaction::Transaction};

/// The header row of an export.
pub const EXPORT_HEADER: [&str; 5] = ["Date", "Title", "Type", "Category", "Amount"];

/// The file name suggested for exports.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "expenses.csv";

/// Write `transactions` to `writer` as CSV.
///
/// Rows are written in the order given, dates are in the display format
/// (e.g. "01 May 2024") and amounts keep their sign. Fields that contain a
/// comma or quote are quoted.
///
/// # Errors
/// Returns [Error::CSVError] if the CSV could not be written.
pub fn write_csv<W: Write>(transactions: &[Transaction], writer: W) -> Result<(), Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(EXPORT_HEADER)?;

    for transaction in transactions {
        csv_writer.write_record([
            format_date(transaction.date).as_str(),
            transaction.title.as_str(),
            transaction.transaction_type().label(),
            transaction.category.as_str(),
            transaction.amount.to_string().as_str(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|error| Error::CSVError(error.to_string()))?;

    tracing::debug!("Exported {} transactions", transactions.len());

    Ok(())
}

/// Export `transactions` as a CSV string.
///
/// # Errors
/// Returns [Error::CSVError] if the CSV could not be written.
pub fn export_csv(transactions: &[Transaction]) -> Result<String, Error> {
    let mut buffer = Vec::new();
    write_csv(transactions, &mut buffer)?;

    String::from_utf8(buffer).map_err(|error| Error::CSVError(error.to_string()))
}
