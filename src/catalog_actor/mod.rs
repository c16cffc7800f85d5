//! # Catalog Actor
//!
//! Owns every [`Vendor`] and its menu. Profile CRUD comes from the framework;
//! menu management is expressed as [`CatalogAction`]s so the order actor and
//! the customer session always read a consistent catalog.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](swad_framework::ActorEntity) implementation for [`Vendor`]
//! - [`error`] - [`CatalogError`]
//! - [`actions`] - [`CatalogAction`] and [`CatalogActionResult`]
//! - [`new()`] - Factory function that creates the actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use swadontime::catalog_actor;
//! use swadontime::clients::CatalogClient;
//! use swadontime::model::{MenuFilter, NewMenuItem, VendorCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = catalog_actor::new(32);
//!     let catalog = CatalogClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let vendor_id = catalog
//!         .register_vendor(VendorCreate {
//!             slug: "momo-house".to_string(),
//!             name: "Momo House".to_string(),
//!             menu: vec![NewMenuItem::new("Veg Momos", 80, "Momos")],
//!             ..VendorCreate::default()
//!         })
//!         .await?;
//!
//!     let momos = catalog.browse(vendor_id, &MenuFilter::category("Momos")).await?;
//!     assert_eq!(momos.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Vendor;
use swad_framework::{ResourceActor, ResourceClient};

/// Creates a new Catalog actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Vendor>, ResourceClient<Vendor>) {
    ResourceActor::new(buffer_size)
}
