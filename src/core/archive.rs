//! Historical minimum-price tracker keyed by product name.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{PriceComparison, PriceReference};

/// Archive of the lowest price ever observed per product.
///
/// Keys are product names trimmed and lowercased. `min_price` only ever
/// decreases over an entry's lifetime; `last_seen` is refreshed on every
/// valid observation. Timestamps are injected by the caller so the component
/// stays deterministic under test.
#[derive(Debug, Clone, Default)]
pub struct PriceArchive {
    entries: BTreeMap<String, PriceReference>,
}

impl PriceArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: BTreeMap<String, PriceReference>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, PriceReference> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The archive key for a product name.
    pub fn normalize_key(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Records one price observation. Empty names and non-positive or
    /// non-finite prices are ignored; returns whether the archive changed.
    pub fn record_observation(
        &mut self,
        name: &str,
        price: f64,
        seen_at: DateTime<Utc>,
    ) -> bool {
        let key = Self::normalize_key(name);
        if key.is_empty() || !price.is_finite() || price <= 0.0 {
            return false;
        }
        match self.entries.get_mut(&key) {
            Some(entry) => {
                if price < entry.min_price {
                    entry.min_price = price;
                }
                entry.last_seen = seen_at;
            }
            None => {
                self.entries.insert(
                    key,
                    PriceReference {
                        min_price: price,
                        last_seen: seen_at,
                    },
                );
            }
        }
        true
    }

    pub fn lookup(&self, name: &str) -> Option<&PriceReference> {
        self.entries.get(&Self::normalize_key(name))
    }

    /// Compares a current price against the recorded minimum. `None` when no
    /// reference exists or either price is non-positive.
    pub fn compare_to_reference(&self, name: &str, current_price: f64) -> Option<PriceComparison> {
        if !current_price.is_finite() || current_price <= 0.0 {
            return None;
        }
        let entry = self.lookup(name)?;
        if entry.min_price <= 0.0 {
            return None;
        }
        Some(PriceComparison {
            reference_price: entry.min_price,
            percent_difference: (current_price - entry.min_price) / entry.min_price * 100.0,
        })
    }
}
