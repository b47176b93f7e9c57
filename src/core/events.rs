//! In-process change notification for the persisted slots.

use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::{
    domain::{Expense, PriceReference},
    storage::Slot,
};

/// Broadcast after a slot's in-memory value changes, carrying the new value
/// so observers can re-render without re-reading storage.
#[derive(Debug, Clone)]
pub enum ChangeEvent {
    Expenses(Vec<Expense>),
    Stores(Vec<String>),
    ProductsReference(BTreeMap<String, PriceReference>),
}

impl ChangeEvent {
    pub fn slot(&self) -> Slot {
        match self {
            ChangeEvent::Expenses(_) => Slot::Expenses,
            ChangeEvent::Stores(_) => Slot::Stores,
            ChangeEvent::ProductsReference(_) => Slot::ProductsReference,
        }
    }
}

/// Fan-out bus over mpsc channels. Subscribers that dropped their receiver
/// are pruned on the next publish.
#[derive(Debug, Default)]
pub struct ChangeBus {
    subscribers: Vec<Sender<ChangeEvent>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<ChangeEvent> {
        let (sender, receiver) = channel();
        self.subscribers.push(sender);
        receiver
    }

    pub fn publish(&mut self, event: ChangeEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
