//! Presents ledger views as plain text tables.

use std::io::{self, Write};

use crate::{
    display::{format_amount, format_currency, format_date, format_expense_total},
    filter::ALL,
    ledger::{LedgerView, Presenter},
    options::FilterOptions,
    pagination::{PaginationIndicator, create_pagination_indicators},
};

/// Writes views and filter options as text to `writer`.
pub struct TerminalPresenter<W> {
    writer: W,
    max_pages: usize,
}

impl<W: Write> TerminalPresenter<W> {
    /// Create a presenter that lists at most `max_pages` page numbers.
    pub fn new(writer: W, max_pages: usize) -> Self {
        Self { writer, max_pages }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_view(&mut self, view: &LedgerView) -> io::Result<()> {
        let w = &mut self.writer;

        writeln!(
            w,
            "{:<15} {:<12} {:<24} {:<8} {:<14} {:>12}",
            "ID", "Date", "Title", "Type", "Category", "Amount"
        )?;

        if view.rows.is_empty() {
            writeln!(w, "No transactions found.")?;
        }

        for transaction in &view.rows {
            writeln!(
                w,
                "{:<15} {:<12} {:<24} {:<8} {:<14} {:>12}",
                transaction.id,
                format_date(transaction.date),
                transaction.title,
                transaction.transaction_type().label(),
                transaction.category,
                format_amount(transaction.amount),
            )?;
        }

        let summary = &view.summary;
        writeln!(w)?;
        writeln!(
            w,
            "Balance: {}  Income: {}  Expense: {}",
            format_currency(summary.balance),
            format_currency(summary.income),
            format_expense_total(summary.expenses),
        )?;

        if !summary.category_breakdown.is_empty() {
            let breakdown: Vec<String> = summary
                .category_breakdown
                .iter()
                .map(|entry| format!("{} {}", entry.category, format_currency(entry.total)))
                .collect();
            writeln!(w, "Spending by category: {}", breakdown.join(", "))?;
        }

        let indicators = create_pagination_indicators(&view.page, self.max_pages);
        writeln!(
            w,
            "Page {}/{}  {}",
            view.page.page,
            view.page.total_pages,
            render_indicators(&indicators)
        )
    }

    fn write_filter_options(&mut self, options: &FilterOptions) -> io::Result<()> {
        writeln!(self.writer, "Months: {}", with_all(&options.months))?;
        writeln!(self.writer, "Categories: {}", with_all(&options.categories))
    }
}

fn with_all(values: &[String]) -> String {
    std::iter::once(ALL)
        .chain(values.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_indicators(indicators: &[PaginationIndicator]) -> String {
    indicators
        .iter()
        .map(|indicator| match indicator {
            PaginationIndicator::Page(page) => page.to_string(),
            PaginationIndicator::CurrPage(page) => format!("[{page}]"),
            PaginationIndicator::Ellipsis => "...".to_owned(),
            PaginationIndicator::NextButton(_) => ">".to_owned(),
            PaginationIndicator::BackButton(_) => "<".to_owned(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_view(&mut self, view: &LedgerView) {
        if let Err(error) = self.write_view(view) {
            tracing::error!("Could not write transactions: {error}");
        }
    }

    fn show_filter_options(&mut self, options: &FilterOptions) {
        if let Err(error) = self.write_filter_options(options) {
            tracing::error!("Could not write filter options: {error}");
        }
    }
}
