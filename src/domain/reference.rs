//! Reference-price archive entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Historical minimum observed price for a product, plus the moment the
/// product was last seen at any price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReference {
    pub min_price: f64,
    pub last_seen: DateTime<Utc>,
}

/// Result of comparing a current price against the archive.
///
/// A positive `percent_difference` means the current price is above the
/// historical minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceComparison {
    pub reference_price: f64,
    pub percent_difference: f64,
}

impl PriceComparison {
    pub fn is_increase(&self) -> bool {
        self.percent_difference > 0.0
    }
}
