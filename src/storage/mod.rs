//! Persistence adapter for the tracker's named JSON slots.
//!
//! Backends implement [`KvBackend`]; the [`SlotStore`] wrapper owns the
//! fail-soft policy: reads degrade to empty defaults and writes are
//! best-effort, so storage trouble never surfaces as an error to callers.

pub mod json_backend;
pub mod memory;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{error, warn};

use crate::errors::Result;

pub use json_backend::JsonFileBackend;
pub use memory::MemoryBackend;

/// The three persisted slots. Wire names match the storage layout consumed
/// by external collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Expenses,
    Stores,
    ProductsReference,
}

impl Slot {
    pub fn key(self) -> &'static str {
        match self {
            Slot::Expenses => "expenses",
            Slot::Stores => "stores",
            Slot::ProductsReference => "productsReference",
        }
    }
}

/// Raw key-value storage for JSON payloads, one string per slot.
pub trait KvBackend: Send + Sync {
    /// Reads a slot's raw payload; `None` when the slot was never written.
    fn read(&self, slot: Slot) -> Result<Option<String>>;
    /// Writes a slot's raw payload durably.
    fn write(&self, slot: Slot, payload: &str) -> Result<()>;
}

/// Typed adapter over a [`KvBackend`] that absorbs every storage failure.
pub struct SlotStore {
    backend: Box<dyn KvBackend>,
}

impl SlotStore {
    pub fn new(backend: Box<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Loads and decodes a slot. A missing slot, a failed read, or an
    /// undecodable payload all degrade to the type's empty default.
    pub fn load_or_default<T>(&self, slot: Slot) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.backend.read(slot) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!("failed to read slot `{}`: {}", slot.key(), err);
                return T::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "discarding undecodable payload in slot `{}`: {}",
                    slot.key(),
                    err
                );
                T::default()
            }
        }
    }

    /// Encodes and writes a slot, best-effort. Returns whether the write
    /// landed; in-memory state stays authoritative either way.
    pub fn save<T>(&self, slot: Slot, value: &T) -> bool
    where
        T: Serialize + ?Sized,
    {
        let payload = match serde_json::to_string_pretty(value) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to encode slot `{}`: {}", slot.key(), err);
                return false;
            }
        };
        match self.backend.write(slot, &payload) {
            Ok(()) => true,
            Err(err) => {
                error!("failed to write slot `{}`: {}", slot.key(), err);
                false
            }
        }
    }
}
