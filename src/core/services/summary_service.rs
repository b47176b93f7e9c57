//! Period filtering and aggregate statistics over expense collections.

use chrono::NaiveDate;

use crate::domain::{
    DateRange, Expense, ExpenseStats, ExtremeExpense, GroupTotals, Period, DEFAULT_CATEGORY,
};

pub struct SummaryService;

impl SummaryService {
    /// Returns the expenses whose date falls in the period containing
    /// `reference`, inclusive on both ends. `None` means no filter: the full
    /// collection is returned, which callers treat as a valid selection.
    pub fn filter_by_period(
        expenses: &[Expense],
        period: Option<Period>,
        reference: NaiveDate,
    ) -> Vec<Expense> {
        let Some(period) = period else {
            return expenses.to_vec();
        };
        let range = period.range_containing(reference);
        expenses
            .iter()
            .filter(|expense| range.contains(expense.date))
            .cloned()
            .collect()
    }

    /// Computes summary statistics. Empty input yields the all-zero result.
    ///
    /// Max/min ties are resolved to the first matching entry in input order.
    /// Store buckets aggregate whole expenses; category buckets aggregate
    /// individual line items.
    pub fn compute_stats(expenses: &[Expense]) -> ExpenseStats {
        if expenses.is_empty() {
            return ExpenseStats::default();
        }

        let mut stats = ExpenseStats::default();
        let mut max: Option<&Expense> = None;
        let mut min: Option<&Expense> = None;

        for expense in expenses {
            stats.total += expense.total;
            if max.map_or(true, |current| expense.total > current.total) {
                max = Some(expense);
            }
            if min.map_or(true, |current| expense.total < current.total) {
                min = Some(expense);
            }

            let store_bucket = stats
                .store_stats
                .entry(expense.store.clone())
                .or_insert_with(GroupTotals::default);
            store_bucket.count += 1;
            store_bucket.total += expense.total;

            for product in &expense.products {
                let category = if product.category.trim().is_empty() {
                    DEFAULT_CATEGORY
                } else {
                    product.category.as_str()
                };
                let category_bucket = stats
                    .category_stats
                    .entry(category.to_string())
                    .or_insert_with(GroupTotals::default);
                category_bucket.count += 1;
                category_bucket.total += product.price;
            }
        }

        stats.count = expenses.len();
        stats.avg_per_expense = stats.total / stats.count as f64;
        stats.max = extreme(max);
        stats.min = extreme(min);
        stats
    }

    /// One total per day of `range`, in order, for trend rendering. Days
    /// without expenses contribute a zero bucket.
    pub fn daily_totals(expenses: &[Expense], range: DateRange) -> Vec<(NaiveDate, f64)> {
        let mut buckets: Vec<(NaiveDate, f64)> =
            range.days().into_iter().map(|day| (day, 0.0)).collect();
        for expense in expenses {
            if !range.contains(expense.date) {
                continue;
            }
            let offset = expense.date.signed_duration_since(range.start).num_days() as usize;
            buckets[offset].1 += expense.total;
        }
        buckets
    }
}

fn extreme(expense: Option<&Expense>) -> ExtremeExpense {
    expense
        .map(|expense| ExtremeExpense {
            amount: expense.total,
            store: expense.store.clone(),
        })
        .unwrap_or_default()
}
