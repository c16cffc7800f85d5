//! Error types for the Catalog actor.

use crate::model::{ItemId, VendorId};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No vendor is registered under this id.
    #[error("Vendor not found: {0}")]
    VendorNotFound(VendorId),

    /// The vendor's catalog has no item with this id.
    #[error("Item {item_id} not found for {vendor_id}")]
    ItemNotFound { vendor_id: VendorId, item_id: ItemId },

    /// The item data is unusable (e.g. an empty name or category).
    #[error("Invalid menu item: {0}")]
    InvalidItem(String),

    /// An item with this id already exists in the catalog.
    #[error("Duplicate menu item: {0}")]
    DuplicateItem(ItemId),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
