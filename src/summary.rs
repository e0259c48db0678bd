//! Totals for a set of transactions: income, expenses, balance and spending per category.

use serde::Serialize;

use crate::transaction::Transaction;

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// The name of the category.
    pub category: String,
    /// The sum of the absolute amounts of the expenses in the category.
    pub total: i64,
}

/// The totals of a set of transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionSummary {
    /// The sum of the positive amounts.
    pub income: i64,
    /// The sum of the negative amounts. This is zero or negative; use
    /// [crate::display::format_expense_total] to show it.
    pub expenses: i64,
    /// `income + expenses`.
    pub balance: i64,
    /// Spending per category, in the order each category first appears.
    ///
    /// Only expenses are counted, income never appears here even if its
    /// category shares a name with an expense category.
    pub category_breakdown: Vec<CategoryTotal>,
}

impl TransactionSummary {
    /// The category labels and totals in the order they first appear, for charting.
    pub fn breakdown_series(&self) -> (Vec<&str>, Vec<i64>) {
        self.category_breakdown
            .iter()
            .map(|entry| (entry.category.as_str(), entry.total))
            .unzip()
    }

    /// Income next to the absolute expense total, for charting.
    pub fn income_expense_pair(&self) -> [i64; 2] {
        [self.income, self.expenses.saturating_abs()]
    }
}

/// Compute the totals of `transactions`.
///
/// Totals are accumulated without overflow and clamped to the bounds of `i64`
/// once at the end. `balance == income + expenses` and the breakdown summing to
/// the absolute expense total hold whenever those totals fit in an `i64`; an
/// expense total of exactly `i64::MIN` has no positive `i64` counterpart.
pub fn summarize<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> TransactionSummary {
    let mut income: i128 = 0;
    let mut expenses: i128 = 0;
    let mut breakdown: Vec<(&str, i128)> = Vec::new();

    for transaction in transactions {
        let amount = i128::from(transaction.amount);

        if amount > 0 {
            income += amount;
            continue;
        }

        expenses += amount;

        if amount < 0 {
            add_to_category(&mut breakdown, &transaction.category, -amount);
        }
    }

    TransactionSummary {
        income: clamp_total(income),
        expenses: clamp_total(expenses),
        balance: clamp_total(income + expenses),
        category_breakdown: breakdown
            .into_iter()
            .map(|(category, total)| CategoryTotal {
                category: category.to_owned(),
                total: clamp_total(total),
            })
            .collect(),
    }
}

fn add_to_category<'a>(breakdown: &mut Vec<(&'a str, i128)>, category: &'a str, amount: i128) {
    match breakdown.iter_mut().find(|(name, _)| *name == category) {
        Some((_, total)) => *total += amount,
        None => breakdown.push((category, amount)),
    }
}

fn clamp_total(total: i128) -> i64 {
    i64::try_from(total).unwrap_or(if total < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionType};

    use super::{CategoryTotal, TransactionSummary, summarize};

    fn create(id: i64, amount: i64, category: &str) -> Transaction {
        Transaction {
            id,
            title: format!("Transaction {id}"),
            amount,
            category: category.to_owned(),
            date: date!(2024 - 05 - 01),
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        let want = TransactionSummary::default();

        let got = summarize(&[]);

        assert_eq!(want, got);
    }

    #[test]
    fn expense_only_scenario() {
        let coffee = Transaction::build("Coffee", 150, TransactionType::Expense)
            .category("Food")
            .finalize(1, date!(2024 - 05 - 01))
            .unwrap();

        let got = summarize([&coffee]);

        assert_eq!(
            got,
            TransactionSummary {
                income: 0,
                expenses: -150,
                balance: -150,
                category_breakdown: vec![CategoryTotal {
                    category: "Food".to_owned(),
                    total: 150
                }],
            }
        );
    }

    #[test]
    fn income_never_enters_breakdown() {
        let transactions = [
            create(1, -40, "Other"),
            create(2, 500, "Other"),
            create(3, -60, "Other"),
        ];

        let got = summarize(&transactions);

        assert_eq!(got.income, 500);
        assert_eq!(got.expenses, -100);
        assert_eq!(got.balance, 400);
        assert_eq!(
            got.category_breakdown,
            [CategoryTotal {
                category: "Other".to_owned(),
                total: 100
            }]
        );
    }

    #[test]
    fn breakdown_keeps_first_occurrence_order() {
        let transactions = [
            create(1, -10, "Rent"),
            create(2, -20, "Food"),
            create(3, -30, "Rent"),
            create(4, -5, "Bills"),
        ];

        let summary = summarize(&transactions);
        let (labels, totals) = summary.breakdown_series();

        assert_eq!(labels, ["Rent", "Food", "Bills"]);
        assert_eq!(totals, [40, 20, 5]);
    }

    #[test]
    fn totals_hold_for_mixed_input() {
        let transactions = [
            create(1, -150, "Food"),
            create(2, 50_000, "Salary"),
            create(3, -1_200, "Rent"),
            create(4, 0, "Bills"),
            create(5, 3_000, "Freelance"),
            create(6, -75, "Food"),
        ];

        let got = summarize(&transactions);

        assert!(got.income >= 0);
        assert!(got.expenses <= 0);
        assert_eq!(got.balance, got.income + got.expenses);
        let breakdown_sum: i64 = got.category_breakdown.iter().map(|entry| entry.total).sum();
        assert_eq!(breakdown_sum, got.expenses.abs());
        assert_eq!(got.income_expense_pair(), [53_000, 1_425]);
    }

    #[test]
    fn intermediate_overflow_does_not_skew_totals() {
        let transactions = [
            create(1, i64::MAX, "Salary"),
            create(2, 1, "Salary"),
            create(3, -1, "Food"),
        ];

        let got = summarize(&transactions);

        assert_eq!(got.income, i64::MAX);
        assert_eq!(got.expenses, -1);
        assert_eq!(got.balance, i64::MAX);
    }

    #[test]
    fn breakdown_matches_large_expense_total() {
        let transactions = [
            create(1, -(1 << 62), "Rent"),
            create(2, -((1 << 62) - 1), "Rent"),
        ];

        let got = summarize(&transactions);

        assert_eq!(got.expenses, -i64::MAX);
        let breakdown_sum: i64 = got.category_breakdown.iter().map(|entry| entry.total).sum();
        assert_eq!(breakdown_sum, got.expenses.abs());
    }
}
