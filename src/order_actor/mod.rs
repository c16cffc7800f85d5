//! # Order Actor
//!
//! Owns placed [`Order`]s. Its context is a [`CatalogClient`]: placement is
//! checked against the vendor's live catalog inside `on_create`, so an order
//! that reaches the store always refers to real, available items.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](swad_framework::ActorEntity) implementation for [`Order`]
//! - [`error`] - [`OrderError`] and placement [`RejectReason`]s
//! - [`actions`] - [`OrderAction`] for status, ETA and queue updates
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let (catalog_actor, catalog) = catalog_actor::new(32);
//! let (order_actor, orders) = order_actor::new(32);
//! tokio::spawn(catalog_actor.run(()));
//! tokio::spawn(order_actor.run(CatalogClient::new(catalog.clone())));
//! ```
//!
//! Order ids count up from [`FIRST_ORDER_ID`], so the first order is
//! `ORD12345`.
//!
//! [`CatalogClient`]: crate::clients::CatalogClient

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Order;
use swad_framework::{ResourceActor, ResourceClient};

pub const FIRST_ORDER_ID: u32 = 12345;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::with_first_id(buffer_size, FIRST_ORDER_ID)
}
