//! Aggregate statistics over a set of expenses.

use std::collections::BTreeMap;

use serde::Serialize;

/// Summary statistics for a (possibly filtered) expense collection.
///
/// The default value is the canonical empty result: zero totals, empty store
/// labels, empty breakdowns.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseStats {
    pub total: f64,
    pub count: usize,
    pub max: ExtremeExpense,
    pub min: ExtremeExpense,
    pub avg_per_expense: f64,
    pub store_stats: BTreeMap<String, GroupTotals>,
    pub category_stats: BTreeMap<String, GroupTotals>,
}

/// The largest or smallest expense, with the store it belongs to.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExtremeExpense {
    pub amount: f64,
    pub store: String,
}

/// Count and summed amount for one store or category bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct GroupTotals {
    pub count: usize,
    pub total: f64,
}
