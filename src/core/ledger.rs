//! CRUD store of completed purchases.

use chrono::{DateTime, Utc};

use crate::{
    domain::{parse_date, Expense, LineItemDraft},
    errors::{Result, TrackerError},
    utils::ids,
};

/// In-memory collection of expenses with derived totals and unique ids.
///
/// The ledger is a pure component: persistence, archive feeding, and store
/// auto-registration are orchestrated by the owning facade.
#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
}

impl ExpenseLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Records a new expense.
    ///
    /// Batch-level fields are validated strictly: a blank store, an
    /// empty/unparseable date, or an empty product list is a validation
    /// error naming the offending field. Individual items stay lenient: a
    /// malformed price is coerced to 0 during draft normalization rather
    /// than failing the batch.
    pub fn add(
        &mut self,
        store: &str,
        date: &str,
        products: Vec<LineItemDraft>,
        created_at: DateTime<Utc>,
    ) -> Result<Expense> {
        let store = store.trim();
        if store.is_empty() {
            return Err(TrackerError::Validation("store must not be empty".into()));
        }
        let date = parse_date(date).ok_or_else(|| {
            TrackerError::Validation("date is missing or not a valid calendar date".into())
        })?;
        if products.is_empty() {
            return Err(TrackerError::Validation(
                "an expense needs at least one product".into(),
            ));
        }

        let products: Vec<_> = products.into_iter().map(LineItemDraft::normalize).collect();
        let total = Expense::total_of(&products);
        let expense = Expense {
            id: ids::new_id(),
            store: store.to_string(),
            date,
            products,
            total,
            created_at,
        };
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Removes the expense with the given id; false when unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.expenses.iter().position(|expense| expense.id == id) {
            Some(index) => {
                self.expenses.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.expenses.clear();
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    /// Replaces an expense's product list and recomputes its total. The
    /// reference-price archive is deliberately left untouched: it reflects
    /// prices as observed at commit time.
    pub fn replace_products(&mut self, id: &str, products: Vec<LineItemDraft>) -> bool {
        let Some(expense) = self.expenses.iter_mut().find(|expense| expense.id == id) else {
            return false;
        };
        expense.products = products.into_iter().map(LineItemDraft::normalize).collect();
        expense.total = Expense::total_of(&expense.products);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn add_computes_total_from_products() {
        let mut ledger = ExpenseLedger::new();
        let expense = ledger
            .add(
                "Conad",
                "2024-03-01",
                vec![
                    LineItemDraft::new("Latte", 1.25),
                    LineItemDraft::new("Pane", 2.75),
                ],
                now(),
            )
            .expect("valid expense");
        assert_eq!(expense.total, 4.0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn add_coerces_malformed_prices_instead_of_failing() {
        let mut ledger = ExpenseLedger::new();
        let malformed = LineItemDraft {
            name: "Biscotti".into(),
            ..LineItemDraft::default()
        };
        let expense = ledger
            .add(
                "Lidl",
                "2024-03-02",
                vec![LineItemDraft::new("Caffè", 3.10), malformed],
                now(),
            )
            .expect("batch survives a malformed item");
        assert_eq!(expense.total, 3.10);
        assert_eq!(expense.products.len(), 2);
        assert_eq!(expense.products[1].price, 0.0);
    }

    #[test]
    fn add_rejects_blank_store() {
        let mut ledger = ExpenseLedger::new();
        let err = ledger
            .add("", "2024-01-01", vec![LineItemDraft::new("Latte", 1.0)], now())
            .expect_err("blank store must fail");
        assert!(err.to_string().contains("store"), "unexpected error: {err}");
    }

    #[test]
    fn add_rejects_unparseable_date() {
        let mut ledger = ExpenseLedger::new();
        let err = ledger
            .add("Coop", "not-a-date", vec![LineItemDraft::new("Latte", 1.0)], now())
            .expect_err("bad date must fail");
        assert!(err.to_string().contains("date"), "unexpected error: {err}");
    }

    #[test]
    fn add_rejects_empty_product_list() {
        let mut ledger = ExpenseLedger::new();
        let err = ledger
            .add("Lidl", "2024-01-01", Vec::new(), now())
            .expect_err("empty batch must fail");
        assert!(
            err.to_string().contains("product"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn add_accepts_timestamp_dates() {
        let mut ledger = ExpenseLedger::new();
        let expense = ledger
            .add(
                "Coop",
                "2024-03-01T18:30:00+01:00",
                vec![LineItemDraft::new("Latte", 1.0)],
                now(),
            )
            .expect("timestamp date accepted");
        assert_eq!(expense.date.to_string(), "2024-03-01");
    }

    #[test]
    fn remove_is_idempotent_per_id() {
        let mut ledger = ExpenseLedger::new();
        let expense = ledger
            .add("Coop", "2024-01-01", vec![LineItemDraft::new("Latte", 1.0)], now())
            .unwrap();
        assert!(ledger.remove(&expense.id));
        assert!(!ledger.remove(&expense.id));
        assert!(ledger.is_empty());
    }

    #[test]
    fn replace_products_recomputes_total() {
        let mut ledger = ExpenseLedger::new();
        let expense = ledger
            .add("Coop", "2024-01-01", vec![LineItemDraft::new("Latte", 1.0)], now())
            .unwrap();
        assert!(ledger.replace_products(
            &expense.id,
            vec![
                LineItemDraft::new("Pane", 2.0),
                LineItemDraft::new("Uova", 3.0),
            ],
        ));
        let updated = ledger.find_by_id(&expense.id).expect("still present");
        assert_eq!(updated.total, 5.0);
        assert_eq!(updated.products.len(), 2);
    }

    #[test]
    fn replace_products_on_unknown_id_is_false() {
        let mut ledger = ExpenseLedger::new();
        assert!(!ledger.replace_products("missing", vec![LineItemDraft::new("Pane", 2.0)]));
    }
}
