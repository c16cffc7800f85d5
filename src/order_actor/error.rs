//! Error types for the Order actor.

use crate::model::{ItemId, OrderId, VendorId};
use crate::status::InvalidTransition;
use thiserror::Error;

/// Why an order was refused at placement.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RejectReason {
    #[error("order has no items")]
    EmptyOrder,

    #[error("unknown vendor {0}")]
    UnknownVendor(VendorId),

    #[error("unknown item {0}")]
    UnknownItem(ItemId),

    #[error("item {0} is currently unavailable")]
    ItemUnavailable(ItemId),

    #[error("item {0} has a non-positive quantity")]
    InvalidQuantity(ItemId),

    #[error("item {0} appears on more than one line")]
    DuplicateLine(ItemId),

    #[error("order total is too large")]
    TotalTooLarge,
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(OrderId),

    /// The status change is not allowed from the order's current status.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    /// The order was refused at placement.
    #[error("Order rejected: {0}")]
    Rejected(RejectReason),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<RejectReason> for OrderError {
    fn from(reason: RejectReason) -> Self {
        OrderError::Rejected(reason)
    }
}
