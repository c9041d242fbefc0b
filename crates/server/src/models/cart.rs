//! Session-scoped shopping cart.
//!
//! The cart lives entirely in the session; it is never persisted to its own
//! table. Lines snapshot the variant's price and display fields at the time
//! they were added, so later price changes do not move an open cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use parfum_core::VariantId;

/// One line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub variant_id: VariantId,
    pub name: String,
    pub brand: String,
    pub volume: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// The session cart: an ordered list of lines plus a derived total.
///
/// The total is recomputed from scratch after every mutation; it is never
/// adjusted incrementally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add a line to the cart.
    ///
    /// If the variant is already present its quantity is incremented;
    /// otherwise the line is appended. The total is recomputed either way.
    pub fn add(&mut self, item: CartItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.variant_id == item.variant_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
        self.recompute_total();
    }

    fn recompute_total(&mut self) {
        self.total = self
            .items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();
    }
}
