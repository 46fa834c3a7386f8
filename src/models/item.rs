use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;
use crate::error::{Result, ShopCalcError};

fn default_quantity() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Item — One shopping-list entry
// ---------------------------------------------------------------------------

/// A shopping-list entry, pending until [`completed_at`](Self::completed_at)
/// is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Unit price. `None` means the cost is not tracked.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(rename = "added_date", with = "timestamp")]
    pub added_at: NaiveDateTime,
    #[serde(
        rename = "completed_date",
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub completed_at: Option<NaiveDateTime>,
}

impl Item {
    /// Create a pending item stamped with the current local time.
    pub fn new(name: impl Into<String>, quantity: u32, price: Option<f64>) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
            added_at: timestamp::now(),
            completed_at: None,
        }
    }

    /// Check the entry rules: a non-blank name, a quantity of at least 1,
    /// and a finite, non-negative price when one is set.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ShopCalcError::InvalidArgument(
                "Item name must not be empty".into(),
            ));
        }
        if self.quantity == 0 {
            return Err(ShopCalcError::InvalidArgument(format!(
                "Quantity of '{}' must be at least 1",
                self.name
            )));
        }
        if let Some(p) = self.price {
            if !p.is_finite() || p < 0.0 {
                return Err(ShopCalcError::InvalidArgument(format!(
                    "Price of '{}' must be a non-negative number, got {p}",
                    self.name
                )));
            }
        }
        Ok(())
    }

    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// `price * quantity`, or `None` when the price is not tracked.
    pub fn subtotal(&self) -> Option<f64> {
        self.price.map(|p| p * f64::from(self.quantity))
    }
}
