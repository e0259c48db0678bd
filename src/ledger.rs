//! The ledger ties the transaction store to the views derived from it.
//!
//! Every change to the collection runs the whole pipeline before returning:
//! persist, derive the filter options, filter, summarize, paginate and hand the
//! results to a [Presenter]. Nothing is cached between calls.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    export::export_csv,
    filter::{FilterCriteria, apply_filter},
    options::{FilterOptions, derive_filter_options},
    pagination::{Page, PageState},
    stores::{KeyValueStore, TransactionStore},
    summary::{TransactionSummary, summarize},
    transaction::{Transaction, TransactionForm, TransactionId, next_transaction_id},
};

/// Everything needed to show one page of filtered transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// The transactions on the current page.
    pub rows: Vec<Transaction>,
    /// The totals of all filtered transactions, not just the current page.
    pub summary: TransactionSummary,
    /// The current page, already clamped.
    pub page: Page,
    /// The number of transactions that met the filter criteria.
    pub filtered_count: usize,
}

/// Shows the results of the ledger pipeline to the user.
pub trait Presenter {
    /// Show a page of transactions and the summary of the filtered transactions.
    fn show_view(&mut self, view: &LedgerView);

    /// Replace the choices offered by the month and category filters.
    fn show_filter_options(&mut self, options: &FilterOptions);
}

/// A presenter that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn show_view(&mut self, _view: &LedgerView) {}

    fn show_filter_options(&mut self, _options: &FilterOptions) {}
}

/// Owns the transactions, the active filters and the page state.
pub struct Ledger<S, P> {
    store: TransactionStore<S>,
    criteria: FilterCriteria,
    page_state: PageState,
    options: FilterOptions,
    presenter: P,
}

impl<S: KeyValueStore, P: Presenter> Ledger<S, P> {
    /// Create a ledger over a loaded `store`, showing every transaction.
    ///
    /// Nothing is presented until [Ledger::start] or another operation is called.
    pub fn new(store: TransactionStore<S>, page_state: PageState, presenter: P) -> Self {
        let options = derive_filter_options(store.all());

        Self {
            store,
            criteria: FilterCriteria::all(),
            page_state,
            options,
            presenter,
        }
    }

    /// Set the initial filter criteria without presenting anything.
    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Present the filter options and the first view.
    pub fn start(&mut self) -> LedgerView {
        self.on_mutation()
    }

    /// Create a transaction from the user's submission and add it to the ledger.
    ///
    /// `today` is used when the submission has no date.
    ///
    /// # Errors
    /// Returns the validation error if the submission is rejected, or a storage
    /// error if the collection could not be persisted. The ledger is unchanged
    /// and nothing is presented in either case.
    pub fn add(&mut self, form: &TransactionForm, today: Date) -> Result<LedgerView, Error> {
        let builder = form.validate()?;
        let id = next_transaction_id(OffsetDateTime::now_utc(), self.store.all());
        let transaction = builder.finalize(id, today)?;

        self.store.add(transaction)?;

        Ok(self.on_mutation())
    }

    /// Remove the transaction with `id`. Removing an unknown ID is not an error.
    ///
    /// # Errors
    /// Returns a storage error if the collection could not be persisted. The
    /// ledger is unchanged and nothing is presented in that case.
    pub fn remove(&mut self, id: TransactionId) -> Result<LedgerView, Error> {
        self.store.remove(id)?;

        Ok(self.on_mutation())
    }

    /// Derive the filter options from the full collection and refresh the view.
    ///
    /// Runs after every successful change to the collection.
    fn on_mutation(&mut self) -> LedgerView {
        self.options = derive_filter_options(self.store.all());
        tracing::debug!(
            "Derived {} month and {} category options",
            self.options.months.len(),
            self.options.categories.len()
        );
        self.presenter.show_filter_options(&self.options);

        self.render()
    }

    /// Filter, summarize and paginate the collection and present the result.
    ///
    /// The current page is clamped to the pages that exist.
    pub fn render(&mut self) -> LedgerView {
        let filtered = apply_filter(self.store.all(), &self.criteria);
        let summary = summarize(filtered.iter().copied());
        let page = self.page_state.clamp(filtered.len());

        let view = LedgerView {
            rows: page.slice(&filtered).iter().copied().cloned().collect(),
            summary,
            page,
            filtered_count: filtered.len(),
        };

        tracing::debug!(
            "Showing page {}/{} of {} filtered transactions",
            page.page,
            page.total_pages,
            filtered.len()
        );
        self.presenter.show_view(&view);

        view
    }

    /// Replace the filter criteria, go back to the first page and refresh the view.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) -> LedgerView {
        self.criteria = criteria;
        self.page_state.reset();

        self.render()
    }

    /// Clear every filter and refresh the view.
    pub fn reset_filters(&mut self) -> LedgerView {
        self.criteria = FilterCriteria::all();

        self.render()
    }

    /// Go to the next page and refresh the view.
    pub fn next_page(&mut self) -> LedgerView {
        self.page_state.next_page();

        self.render()
    }

    /// Go to the previous page and refresh the view.
    pub fn previous_page(&mut self) -> LedgerView {
        self.page_state.previous_page();

        self.render()
    }

    /// Go to `page` and refresh the view.
    pub fn go_to_page(&mut self, page: i64) -> LedgerView {
        self.page_state.go_to(page);

        self.render()
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        self.store.all()
    }

    /// The active filter criteria.
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The filter options derived after the last change.
    pub fn filter_options(&self) -> &FilterOptions {
        &self.options
    }

    /// The current page state.
    pub fn page_state(&self) -> &PageState {
        &self.page_state
    }

    /// The presenter results are shown with.
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Export the full, unfiltered collection as CSV.
    ///
    /// # Errors
    /// Returns [Error::CSVError] if the CSV could not be written.
    pub fn export_csv(&self) -> Result<String, Error> {
        export_csv(self.store.all())
    }
}

#[cfg(test)]
mod ledger_tests {
    use time::macros::date;

    use crate::{
        Error,
        filter::{FilterCriteria, TypeFilter},
        options::FilterOptions,
        pagination::PageState,
        stores::{DEFAULT_STORAGE_KEY, KeyValueStore, MemoryStore, TransactionStore},
        summary::CategoryTotal,
        transaction::{Transaction, TransactionForm},
    };

    use super::{Ledger, LedgerView, Presenter};

    /// Records everything it is asked to show.
    #[derive(Default)]
    struct RecordingPresenter {
        views: Vec<LedgerView>,
        options: Vec<FilterOptions>,
    }

    impl Presenter for RecordingPresenter {
        fn show_view(&mut self, view: &LedgerView) {
            self.views.push(view.clone());
        }

        fn show_filter_options(&mut self, options: &FilterOptions) {
            self.options.push(options.clone());
        }
    }

    const SCENARIO: &str = r#"[
        {"id":1,"title":"Coffee","amount":-150,"category":"Food","date":"2024-05-01"},
        {"id":2,"title":"Salary","amount":50000,"category":"Salary","date":"2024-05-02"}
    ]"#;

    fn scenario_ledger(page_size: usize) -> Ledger<MemoryStore, RecordingPresenter> {
        let store = TransactionStore::load(
            MemoryStore::with_record(DEFAULT_STORAGE_KEY, SCENARIO),
            DEFAULT_STORAGE_KEY,
        );

        Ledger::new(
            store,
            PageState::new(page_size).unwrap(),
            RecordingPresenter::default(),
        )
    }

    fn empty_ledger(page_size: usize) -> Ledger<MemoryStore, RecordingPresenter> {
        let store = TransactionStore::load(MemoryStore::new(), DEFAULT_STORAGE_KEY);

        Ledger::new(
            store,
            PageState::new(page_size).unwrap(),
            RecordingPresenter::default(),
        )
    }

    fn form(title: &str, amount: &str, transaction_type: &str, date: &str) -> TransactionForm {
        TransactionForm {
            title: title.to_owned(),
            amount: amount.to_owned(),
            transaction_type: transaction_type.to_owned(),
            category: None,
            date: Some(date.to_owned()),
        }
    }

    fn ids(rows: &[Transaction]) -> Vec<i64> {
        rows.iter().map(|transaction| transaction.id).collect()
    }

    #[test]
    fn expense_filter_scenario() {
        let mut ledger = scenario_ledger(5);

        let view = ledger.set_criteria(FilterCriteria {
            transaction_type: TypeFilter::Expense,
            ..Default::default()
        });

        assert_eq!(ids(&view.rows), [1]);
        assert_eq!(view.summary.income, 0);
        assert_eq!(view.summary.expenses, -150);
        assert_eq!(view.summary.balance, -150);
        assert_eq!(
            view.summary.category_breakdown,
            [CategoryTotal {
                category: "Food".to_owned(),
                total: 150
            }]
        );
    }

    #[test]
    fn page_request_past_end_scenario() {
        let mut ledger = scenario_ledger(1);

        let view = ledger.go_to_page(5);

        assert_eq!(view.page.total_pages, 2);
        assert_eq!(view.page.page, 2);
        assert_eq!(view.page.offset, 1);
        assert_eq!(ids(&view.rows), [2]);
        assert_eq!(ledger.page_state().current_page(), 2);
    }

    #[test]
    fn remove_rederives_options_from_current_collection() {
        let mut ledger = scenario_ledger(5);

        ledger.remove(2).unwrap();

        assert_eq!(ledger.filter_options().months, ["2024-05"]);
        assert_eq!(ledger.filter_options().categories, ["Food"]);
        assert_eq!(ledger.presenter().options.len(), 1);
    }

    #[test]
    fn removing_only_item_on_last_page_moves_back_a_page() {
        let mut ledger = scenario_ledger(1);
        ledger.go_to_page(2);

        let view = ledger.remove(2).unwrap();

        assert_eq!(view.page.page, 1);
        assert_eq!(view.page.total_pages, 1);
        assert_eq!(ids(&view.rows), [1]);
    }

    #[test]
    fn add_persists_then_presents() {
        let mut ledger = empty_ledger(5);

        let view = ledger
            .add(&form("Coffee", "150", "expense", "2024-05-01"), date!(2024 - 05 - 09))
            .unwrap();

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].amount, -150);
        assert_eq!(ledger.filter_options().months, ["2024-05"]);
        assert_eq!(ledger.presenter().views.len(), 1);

        let stored = ledger
            .store
            .backend()
            .get(DEFAULT_STORAGE_KEY)
            .unwrap()
            .unwrap();
        let persisted: Vec<Transaction> = serde_json::from_str(&stored).unwrap();
        assert_eq!(persisted, ledger.transactions());
    }

    #[test]
    fn add_uses_today_when_date_missing() {
        let mut ledger = empty_ledger(5);
        let mut submission = form("Pay", "1,000", "income", "");
        submission.date = None;

        let view = ledger.add(&submission, date!(2024 - 08 - 15)).unwrap();

        assert_eq!(view.rows[0].date, date!(2024 - 08 - 15));
        assert_eq!(view.rows[0].category, "Salary");
    }

    #[test]
    fn rejected_submission_changes_nothing() {
        let mut ledger = scenario_ledger(5);

        let got = ledger.add(&form("", "150", "expense", "2024-05-01"), date!(2024 - 05 - 09));

        assert_eq!(got, Err(Error::MissingField("title")));
        assert_eq!(ledger.transactions().len(), 2);
        assert!(ledger.presenter().views.is_empty());
        assert!(ledger.presenter().options.is_empty());
    }

    #[test]
    fn added_ids_are_unique() {
        let mut ledger = empty_ledger(5);

        for _ in 0..5 {
            ledger
                .add(&form("Coffee", "150", "expense", "2024-05-01"), date!(2024 - 05 - 09))
                .unwrap();
        }

        let mut got = ids(ledger.transactions());
        got.dedup();
        assert_eq!(got.len(), 5);
    }

    #[test]
    fn add_after_largest_possible_id_succeeds() {
        let record = r#"[
            {"id":9223372036854775807,"title":"Coffee","amount":-150,"category":"Food","date":"2024-05-01"}
        ]"#;
        let store = TransactionStore::load(
            MemoryStore::with_record(DEFAULT_STORAGE_KEY, record),
            DEFAULT_STORAGE_KEY,
        );
        let mut ledger = Ledger::new(
            store,
            PageState::new(5).unwrap(),
            RecordingPresenter::default(),
        );

        for _ in 0..3 {
            ledger
                .add(&form("Coffee", "1", "expense", "2024-05-01"), date!(2024 - 05 - 09))
                .unwrap();
        }

        let mut got = ids(ledger.transactions());
        got.sort_unstable();
        got.dedup();
        assert_eq!(got.len(), 4);
        assert_eq!(got.last(), Some(&i64::MAX));
    }

    #[test]
    fn changing_criteria_resets_page() {
        let mut ledger = scenario_ledger(1);
        ledger.go_to_page(2);

        let view = ledger.set_criteria(FilterCriteria::all());

        assert_eq!(view.page.page, 1);
    }

    #[test]
    fn reset_filters_shows_everything() {
        let mut ledger = scenario_ledger(5).with_criteria(FilterCriteria {
            search_text: "coffee".to_owned(),
            ..Default::default()
        });
        assert_eq!(ledger.render().filtered_count, 1);

        let view = ledger.reset_filters();

        assert_eq!(view.filtered_count, 2);
        assert_eq!(ledger.criteria(), &FilterCriteria::all());
    }

    #[test]
    fn page_navigation_is_clamped() {
        let mut ledger = scenario_ledger(1);

        assert_eq!(ledger.previous_page().page.page, 1);
        assert_eq!(ledger.next_page().page.page, 2);
        assert_eq!(ledger.next_page().page.page, 2);
        assert_eq!(ledger.previous_page().page.page, 1);
    }

    #[test]
    fn empty_ledger_is_single_empty_page() {
        let mut ledger = empty_ledger(5);

        let view = ledger.start();

        assert!(view.rows.is_empty());
        assert_eq!((view.page.page, view.page.total_pages), (1, 1));
        assert_eq!(view.summary.balance, 0);
        assert_eq!(ledger.presenter().options, [FilterOptions::default()]);
    }

    #[test]
    fn summary_covers_all_filtered_rows_not_just_page() {
        let mut ledger = scenario_ledger(1);

        let view = ledger.render();

        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.summary.balance, 49_850);
    }

    #[test]
    fn export_uses_full_collection() {
        let mut ledger = scenario_ledger(1);
        ledger.set_criteria(FilterCriteria {
            transaction_type: TypeFilter::Income,
            ..Default::default()
        });

        let csv = ledger.export_csv().unwrap();

        assert_eq!(csv.lines().count(), 3);
    }
}
