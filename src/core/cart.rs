//! Transient working buffer of line items being assembled before checkout.

use chrono::NaiveDate;

use crate::{
    domain::{Expense, LineItem, LineItemDraft},
    errors::{Result, TrackerError},
};

/// Non-persisted list of line items plus an optional pending store/date
/// selection. Unlike the ledger's lenient batch handling, the cart is strict:
/// an item needs a name and a price greater than zero to be accepted.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<LineItem>,
    store: Option<String>,
    date: Option<NaiveDate>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f64 {
        Expense::total_of(&self.items)
    }

    /// Adds an item to the cart, returning the normalized entry.
    pub fn add_item(&mut self, draft: LineItemDraft) -> Result<LineItem> {
        Self::validate(&draft)?;
        let item = draft.normalize();
        self.items.push(item.clone());
        Ok(item)
    }

    /// Replaces an uncommitted entry in place, keeping its id. `Ok(false)`
    /// when the id is unknown.
    pub fn update_item(&mut self, id: &str, draft: LineItemDraft) -> Result<bool> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };
        Self::validate(&draft)?;
        let mut replacement = draft.normalize();
        replacement.id = id.to_string();
        self.items[index] = replacement;
        Ok(true)
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Empties the cart and forgets any pending selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.store = None;
        self.date = None;
    }

    pub fn set_store(&mut self, store: Option<String>) {
        self.store = store
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.date = date;
    }

    pub fn pending_store(&self) -> Option<&str> {
        self.store.as_deref()
    }

    pub fn pending_date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn validate(draft: &LineItemDraft) -> Result<()> {
        if draft.name.trim().is_empty() {
            return Err(TrackerError::Validation(
                "product name must not be empty".into(),
            ));
        }
        if !draft.has_positive_price() {
            return Err(TrackerError::Validation(
                "product price must be a number greater than zero".into(),
            ));
        }
        Ok(())
    }
}
