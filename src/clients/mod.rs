//! Type-safe wrappers around [`ResourceClient`](swad_framework::ResourceClient).
//!
//! Both clients implement [`ActorClient`](swad_framework::ActorClient) for
//! the plain reads and map framework errors back into their actor's error
//! type, so callers match on `CatalogError` / `OrderError` directly.

pub mod catalog_client;
pub mod order_client;

pub use catalog_client::*;
pub use order_client::*;
