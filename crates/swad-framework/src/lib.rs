//! # swad-framework
//!
//! A small resource-oriented actor toolkit on top of Tokio. Each resource type
//! (vendor catalogs, orders) lives in its own [`ResourceActor`], which owns the
//! entities and processes requests sequentially. Callers talk to it through a
//! cloneable [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): domain state and hooks.
//! 2. **Runtime** ([`ResourceActor`]): the message loop, id generation,
//!    watch channels.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): typed requests.
//!
//! ## Context injection
//!
//! Dependencies go into [`ResourceActor::run`], not into the constructor, so an
//! order actor can be given the catalog client after both actors exist:
//!
//! ```rust,ignore
//! let (catalog_actor, catalog) = ResourceActor::<Vendor>::new(32);
//! let (order_actor, orders) = ResourceActor::<Order>::new(32);
//! tokio::spawn(catalog_actor.run(()));
//! tokio::spawn(order_actor.run(CatalogClient::new(catalog.clone())));
//! ```
//!
//! ## Watching
//!
//! [`ResourceClient::watch`] returns a `tokio::sync::watch::Receiver` that sees
//! a snapshot after every successful update or action. Once
//! [`ActorEntity::is_settled`] reports `true` the final snapshot is published
//! and the channel closes, which ends any stream built on it.
//!
//! ## Testing
//!
//! [`mock::MockClient`] scripts replies for a `ResourceClient` without an
//! actor. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
