//! Error types for the cart ledger.

use crate::model::ItemId;
use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// A failed operation leaves the cart as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// An explicit quantity was set for an item that is not in the cart.
    #[error("Item not in cart: {0}")]
    NotFound(ItemId),

    /// A line total or the cart total does not fit in a `u64`.
    #[error("Cart total is too large")]
    AmountOverflow,
}
