//! Facade that coordinates the ledger, registry, archive, and cart.

use std::collections::BTreeMap;
use std::sync::mpsc::Receiver;

use chrono::NaiveDate;

use crate::{
    core::{
        archive::PriceArchive,
        cart::Cart,
        events::{ChangeBus, ChangeEvent},
        ledger::ExpenseLedger,
        registry::StoreRegistry,
        services::SummaryService,
        time::{Clock, SystemClock},
    },
    domain::{Expense, ExpenseStats, LineItem, LineItemDraft, Period, PriceComparison, PriceReference},
    errors::{Result, TrackerError},
    storage::{KvBackend, Slot, SlotStore},
};

/// Outcome of adding a product to the cart: the stored entry plus its price
/// comparison against the reference archive, when one is available.
#[derive(Debug, Clone)]
pub struct CartAddition {
    pub item: LineItem,
    pub comparison: Option<PriceComparison>,
}

/// One tracker instance owns all in-memory state and its persistence.
///
/// Construction loads every slot fail-soft and seeds the default store list
/// when the registry comes up empty. Each component exclusively owns writes
/// to its slot; every successful save is followed by a change broadcast so
/// view collaborators can re-render without polling.
///
/// Concurrent processes sharing the same backing storage are last-write-wins:
/// there is no cross-process locking or merging. A host reacting to an
/// external change signal calls [`Tracker::reload_slot`].
pub struct Tracker {
    ledger: ExpenseLedger,
    registry: StoreRegistry,
    archive: PriceArchive,
    cart: Cart,
    store: SlotStore,
    bus: ChangeBus,
    clock: Box<dyn Clock>,
}

impl Tracker {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self::with_clock(backend, Box::new(SystemClock))
    }

    pub fn with_clock(backend: Box<dyn KvBackend>, clock: Box<dyn Clock>) -> Self {
        let store = SlotStore::new(backend);
        let ledger = ExpenseLedger::from_expenses(store.load_or_default(Slot::Expenses));
        let registry = StoreRegistry::from_names(store.load_or_default(Slot::Stores));
        let archive = PriceArchive::from_entries(store.load_or_default(Slot::ProductsReference));

        let mut tracker = Self {
            ledger,
            registry,
            archive,
            cart: Cart::new(),
            store,
            bus: ChangeBus::new(),
            clock,
        };
        if tracker.registry.ensure_defaults() {
            tracker.persist_stores();
        }
        tracker
    }

    /// Registers an observer for slot changes.
    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        self.bus.subscribe()
    }

    // ------------------------------------------------------------------
    // Expenses
    // ------------------------------------------------------------------

    pub fn expenses(&self) -> &[Expense] {
        self.ledger.expenses()
    }

    pub fn find_expense(&self, id: &str) -> Option<&Expense> {
        self.ledger.find_by_id(id)
    }

    /// Records a new expense, then feeds each product to the reference
    /// archive and auto-registers an unknown store name.
    pub fn add_expense(
        &mut self,
        store: &str,
        date: &str,
        products: Vec<LineItemDraft>,
    ) -> Result<Expense> {
        let now = self.clock.now();
        let expense = self.ledger.add(store, date, products, now)?;
        self.persist_expenses();

        for product in &expense.products {
            if self.archive.record_observation(&product.name, product.price, now) {
                self.persist_references();
            }
        }
        if self.registry.add(&expense.store) {
            self.persist_stores();
        }
        Ok(expense)
    }

    pub fn remove_expense(&mut self, id: &str) -> bool {
        if self.ledger.remove(id) {
            self.persist_expenses();
            true
        } else {
            false
        }
    }

    pub fn clear_expenses(&mut self) {
        self.ledger.clear();
        self.persist_expenses();
    }

    pub fn replace_products(&mut self, id: &str, products: Vec<LineItemDraft>) -> bool {
        if self.ledger.replace_products(id, products) {
            self.persist_expenses();
            true
        } else {
            false
        }
    }

    /// Case-insensitive search across store names and product names.
    pub fn search_expenses(&self, query: &str) -> Vec<Expense> {
        let needle = query.trim().to_lowercase();
        self.ledger
            .expenses()
            .iter()
            .filter(|expense| {
                needle.is_empty()
                    || expense.store.to_lowercase().contains(&needle)
                    || expense
                        .products
                        .iter()
                        .any(|product| product.name.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect()
    }

    pub fn expenses_in_period(
        &self,
        period: Option<Period>,
        reference: Option<NaiveDate>,
    ) -> Vec<Expense> {
        let reference = reference.unwrap_or_else(|| self.clock.today());
        SummaryService::filter_by_period(self.ledger.expenses(), period, reference)
    }

    pub fn stats_for_period(
        &self,
        period: Option<Period>,
        reference: Option<NaiveDate>,
    ) -> ExpenseStats {
        SummaryService::compute_stats(&self.expenses_in_period(period, reference))
    }

    // ------------------------------------------------------------------
    // Stores
    // ------------------------------------------------------------------

    pub fn stores(&self) -> Vec<String> {
        self.registry.list()
    }

    pub fn add_store(&mut self, name: &str) -> bool {
        if self.registry.add(name) {
            self.persist_stores();
            true
        } else {
            false
        }
    }

    pub fn remove_store(&mut self, name: &str) -> bool {
        if self.registry.remove(name) {
            self.persist_stores();
            true
        } else {
            false
        }
    }

    pub fn rename_store(&mut self, old_name: &str, new_name: &str) -> bool {
        if self.registry.rename(old_name, new_name) {
            self.persist_stores();
            true
        } else {
            false
        }
    }

    pub fn reset_default_stores(&mut self) {
        self.registry.reset_defaults();
        self.persist_stores();
    }

    // ------------------------------------------------------------------
    // Price references
    // ------------------------------------------------------------------

    pub fn references(&self) -> &BTreeMap<String, PriceReference> {
        self.archive.entries()
    }

    pub fn record_observation(&mut self, name: &str, price: f64) -> bool {
        let now = self.clock.now();
        if self.archive.record_observation(name, price, now) {
            self.persist_references();
            true
        } else {
            false
        }
    }

    pub fn lookup_reference(&self, name: &str) -> Option<&PriceReference> {
        self.archive.lookup(name)
    }

    pub fn compare_to_reference(&self, name: &str, price: f64) -> Option<PriceComparison> {
        self.archive.compare_to_reference(name, price)
    }

    // ------------------------------------------------------------------
    // Cart
    // ------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds a product to the cart and reports how its price compares with
    /// the archive. The archive itself is only updated at checkout.
    pub fn cart_add_item(&mut self, draft: LineItemDraft) -> Result<CartAddition> {
        let item = self.cart.add_item(draft)?;
        let comparison = self.archive.compare_to_reference(&item.name, item.price);
        Ok(CartAddition { item, comparison })
    }

    pub fn cart_update_item(&mut self, id: &str, draft: LineItemDraft) -> Result<bool> {
        self.cart.update_item(id, draft)
    }

    pub fn cart_remove_item(&mut self, id: &str) -> bool {
        self.cart.remove_item(id)
    }

    pub fn cart_clear(&mut self) {
        self.cart.clear();
    }

    pub fn cart_set_store(&mut self, store: Option<String>) {
        self.cart.set_store(store);
    }

    pub fn cart_set_date(&mut self, date: Option<NaiveDate>) {
        self.cart.set_date(date);
    }

    /// Commits the cart's contents as one expense. The cart is cleared only
    /// after the ledger accepted the batch.
    pub fn checkout(&mut self, store: &str, date: &str) -> Result<Expense> {
        if self.cart.is_empty() {
            return Err(TrackerError::Validation(
                "cannot check out an empty cart".into(),
            ));
        }
        let drafts: Vec<LineItemDraft> = self
            .cart
            .items()
            .iter()
            .cloned()
            .map(LineItemDraft::from)
            .collect();
        let expense = self.add_expense(store, date, drafts)?;
        self.cart.clear();
        Ok(expense)
    }

    // ------------------------------------------------------------------
    // Cross-process coordination
    // ------------------------------------------------------------------

    /// Re-reads one slot from storage and notifies observers. This is the
    /// hook a host calls when another process signals that the slot changed
    /// underneath us (last write wins; the freshly read state replaces ours).
    pub fn reload_slot(&mut self, slot: Slot) {
        match slot {
            Slot::Expenses => {
                self.ledger = ExpenseLedger::from_expenses(self.store.load_or_default(slot));
                self.bus
                    .publish(ChangeEvent::Expenses(self.ledger.expenses().to_vec()));
            }
            Slot::Stores => {
                self.registry = StoreRegistry::from_names(self.store.load_or_default(slot));
                self.bus.publish(ChangeEvent::Stores(self.registry.list()));
            }
            Slot::ProductsReference => {
                self.archive = PriceArchive::from_entries(self.store.load_or_default(slot));
                self.bus
                    .publish(ChangeEvent::ProductsReference(self.archive.entries().clone()));
            }
        }
    }

    // ------------------------------------------------------------------
    // Persistence + notification
    // ------------------------------------------------------------------

    fn persist_expenses(&mut self) {
        if self.store.save(Slot::Expenses, self.ledger.expenses()) {
            self.bus
                .publish(ChangeEvent::Expenses(self.ledger.expenses().to_vec()));
        }
    }

    fn persist_stores(&mut self) {
        if self.store.save(Slot::Stores, &self.registry.list()) {
            self.bus.publish(ChangeEvent::Stores(self.registry.list()));
        }
    }

    fn persist_references(&mut self) {
        if self.store.save(Slot::ProductsReference, self.archive.entries()) {
            self.bus
                .publish(ChangeEvent::ProductsReference(self.archive.entries().clone()));
        }
    }
}
