//! # SwadOnTime
//!
//! > **The ordering core of a campus food-ordering app.**
//!
//! Customers browse a vendor's menu, fill a cart, check out and follow their
//! order until pickup. Vendors manage their menu, import items read off a
//! printed menu, and move orders through the kitchen.
//!
//! ## 🏗️ Layout
//!
//! Long-lived state sits in two actors built on the generic
//! [`ResourceActor`](swad_framework::ResourceActor):
//!
//! - **[`catalog_actor`]**: vendors and their menus.
//! - **[`order_actor`]**: placed orders. Placement is validated against the
//!   catalog inside the actor, and every status change goes through the
//!   [`status`] state machine.
//!
//! Everything else is plain code around them:
//!
//! - **[`ledger`]**: the cart and its totals. Pure and synchronous.
//! - **[`status`]**: order statuses, legal transitions and the ETA projection.
//! - **[`clients`]**: typed clients for both actors.
//! - **[`session`]**: one customer's menu, cart and checkout.
//! - **[`dashboard`]**: one vendor's order list, stats and lifecycle buttons.
//! - **[`tracking`]**: the cancelable task that simulates kitchen progress.
//! - **[`menu_import`]**: validation of extracted menu rows.
//! - **[`config`]** / **[`lifecycle`]**: settings and system start-up.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use swadontime::config::Settings;
//! use swadontime::fixtures;
//! use swadontime::lifecycle::OrderSystem;
//! use swadontime::model::{ItemId, PaymentMethod};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = OrderSystem::new(Settings::default());
//!     let vendor_id = system
//!         .catalog_client
//!         .register_vendor(fixtures::spice_delight())
//!         .await?;
//!
//!     let mut customer = system.customer_session();
//!     customer.open_menu(vendor_id).await?;
//!     customer.add_item(&ItemId::from("item1")).await?;
//!     customer.add_item(&ItemId::from("item1")).await?;
//!     assert_eq!(customer.totals()?.total, 188);
//!
//!     let order = customer.checkout(PaymentMethod::Cash).await?;
//!     assert_eq!(order.id.to_string(), "ORD12345");
//!
//!     drop(customer);
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## 🧪 Testing
//!
//! Actor-backed code is tested against
//! [`MockClient`](swad_framework::mock::MockClient); the scheduler is tested
//! on Tokio's paused clock.

pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod dashboard;
pub mod fixtures;
pub mod ledger;
pub mod lifecycle;
pub mod menu_import;
pub mod model;
pub mod order_actor;
pub mod session;
pub mod status;
pub mod tracking;
