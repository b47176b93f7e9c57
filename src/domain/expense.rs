//! Domain models for completed purchases and their line items.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::utils::ids;

/// Category assigned to a line item when the caller supplies none.
pub const DEFAULT_CATEGORY: &str = "Other";

fn default_category() -> String {
    DEFAULT_CATEGORY.into()
}

/// A single purchased product inside one expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Normalizing ingestion shape for line items.
///
/// Entry points accept slightly different field sets; every one of them funnels
/// through a draft so that only the canonical [`LineItem`] shape reaches the
/// ledger or the cart. Missing ids are assigned, a missing category falls back
/// to [`DEFAULT_CATEGORY`], and a missing or non-finite price is coerced to 0.
#[derive(Debug, Clone, Default)]
pub struct LineItemDraft {
    pub id: Option<String>,
    pub category: Option<String>,
    pub name: String,
    pub price: Option<f64>,
    pub price_per_kg: Option<f64>,
    pub notes: Option<String>,
}

impl LineItemDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_per_kg(mut self, price_per_kg: f64) -> Self {
        self.price_per_kg = Some(price_per_kg);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// True when the draft carries a usable price (finite and positive).
    pub fn has_positive_price(&self) -> bool {
        matches!(self.price, Some(value) if value.is_finite() && value > 0.0)
    }

    /// Converts the draft into the canonical line-item shape.
    pub fn normalize(self) -> LineItem {
        let price = match self.price {
            Some(value) if value.is_finite() => value,
            _ => {
                warn!(
                    "line item `{}` has a missing or unusable price, coercing to 0",
                    self.name
                );
                0.0
            }
        };
        let category = self
            .category
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(default_category);
        LineItem {
            id: self
                .id
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(ids::new_id),
            category,
            name: self.name.trim().to_string(),
            price,
            price_per_kg: self.price_per_kg.filter(|value| value.is_finite()),
            notes: self
                .notes
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
        }
    }
}

impl From<LineItem> for LineItemDraft {
    fn from(item: LineItem) -> Self {
        Self {
            id: Some(item.id),
            category: Some(item.category),
            name: item.name,
            price: Some(item.price),
            price_per_kg: item.price_per_kg,
            notes: item.notes,
        }
    }
}

/// One completed purchase event.
///
/// `total` is derived from the products and recomputed whenever the product
/// list is replaced; it is never edited independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub store: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub products: Vec<LineItem>,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Sums the prices of a product list.
    pub fn total_of(products: &[LineItem]) -> f64 {
        products.iter().map(|product| product.price).sum()
    }
}
