//! # Cart Ledger
//!
//! The cart a customer fills for one vendor. Lines snapshot the item's name,
//! price and veg tag when the item is first added, so later catalog edits do
//! not reach an open cart. Totals are derived on demand from the lines and a
//! [`PricingConfig`].
//!
//! The ledger is plain synchronous data owned by one
//! [`CustomerSession`](crate::session::CustomerSession); it needs no actor.

pub mod error;
pub mod pricing;

pub use error::*;
pub use pricing::*;

use crate::model::{ItemId, MenuItem, VendorId};
use serde::{Deserialize, Serialize};

/// One item in the cart. `quantity` is never 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: ItemId,
    pub name: String,
    pub unit_price: u64,
    pub is_veg: bool,
    pub quantity: u32,
}

impl CartLine {
    /// `None` when the product does not fit in a `u64`.
    pub fn line_total(&self) -> Option<u64> {
        self.unit_price.checked_mul(u64::from(self.quantity))
    }
}

/// Sum of the line totals.
pub fn subtotal_of(lines: &[CartLine]) -> Result<u64, LedgerError> {
    lines
        .iter()
        .try_fold(0u64, |sum, line| line.line_total()?.checked_add(sum))
        .ok_or(LedgerError::AmountOverflow)
}

/// A single-vendor cart. Lines keep the order items were first added in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    vendor_id: VendorId,
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(vendor_id: VendorId) -> Self {
        Self {
            vendor_id,
            lines: Vec::new(),
        }
    }

    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Adds one unit of `item`, returning the new quantity.
    pub fn add_item(&mut self, item: &MenuItem) -> u32 {
        if let Some(line) = self.line_mut(&item.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            is_veg: item.is_veg,
            quantity: 1,
        });
        1
    }

    /// Removes one unit, dropping the line at zero. Unknown ids are ignored.
    /// Returns what is left.
    pub fn remove_item(&mut self, item_id: &ItemId) -> u32 {
        let Some(index) = self.position(item_id) else {
            return 0;
        };
        let line = &mut self.lines[index];
        if line.quantity > 1 {
            line.quantity -= 1;
            return line.quantity;
        }
        self.lines.remove(index);
        0
    }

    /// Sets an explicit quantity. Zero deletes the line and is fine for ids
    /// that are not in the cart; any other quantity needs an existing line.
    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: u32) -> Result<(), LedgerError> {
        if quantity == 0 {
            self.lines.retain(|line| line.item_id != *item_id);
            return Ok(());
        }
        let line = self
            .line_mut(item_id)
            .ok_or_else(|| LedgerError::NotFound(item_id.clone()))?;
        line.quantity = quantity;
        Ok(())
    }

    pub fn get_quantity(&self, item_id: &ItemId) -> u32 {
        self.position(item_id)
            .map_or(0, |index| self.lines[index].quantity)
    }

    pub fn subtotal(&self) -> Result<u64, LedgerError> {
        subtotal_of(&self.lines)
    }

    pub fn compute_totals(&self, pricing: &PricingConfig) -> Result<Totals, LedgerError> {
        pricing.totals_for(self.subtotal()?)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| line.item_id == *item_id)
    }

    fn line_mut(&mut self, item_id: &ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item_id == *item_id)
    }
}
