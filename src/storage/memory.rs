//! In-memory backend used by tests and as a simulated storage origin.

use std::{collections::HashMap, sync::Mutex};

use crate::{
    errors::{Result, TrackerError},
    storage::{KvBackend, Slot},
};

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<Slot, String>>,
}

impl KvBackend for MemoryBackend {
    fn read(&self, slot: Slot) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| TrackerError::Storage("memory backend lock poisoned".into()))?;
        Ok(entries.get(&slot).cloned())
    }

    fn write(&self, slot: Slot, payload: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| TrackerError::Storage("memory backend lock poisoned".into()))?;
        entries.insert(slot, payload.to_string());
        Ok(())
    }
}
