//! # ActorEntity Trait
//!
//! The contract a resource (a vendor catalog, an order, ...) implements so the
//! generic [`ResourceActor`](crate::ResourceActor) can own it. Associated types
//! name the id, the DTOs, the custom actions and the error; the hooks
//! (`on_create`, `on_update`, `on_delete`, `handle_action`) carry the domain
//! logic.
//!
//! # Provided Methods
//! - [`ActorEntity::on_create`] and [`ActorEntity::on_delete`] default to `Ok(())`.
//! - [`ActorEntity::is_settled`] defaults to `false`. An entity that reports
//!   itself settled stops publishing snapshots to watchers (see
//!   [`ResourceClient::watch`](crate::ResourceClient::watch)).
//! - [`ActorEntity::differs_from`] defaults to `true`. Entities that can
//!   compare snapshots override it so no-op actions do not wake watchers.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are `async` so they can call other actors. The `Context` is handed to
/// `run()` rather than `new()`, which lets actors that depend on each other be
/// constructed first and wired afterwards.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations (e.g. `Advance`, `ToggleAvailability`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// One error enum for the whole actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction and before the entity is stored.
    /// Returning an error rejects the create; nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a custom resource-specific action.
    ///
    /// When this returns an error the entity must be left as it was.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Whether the entity has reached a state it can no longer leave.
    ///
    /// Watch channels for a settled entity are closed after the final
    /// snapshot is published.
    fn is_settled(&self) -> bool {
        false
    }

    /// Whether `self` differs from the snapshot watchers last received.
    ///
    /// Watchers are only woken when this returns `true`. The default
    /// publishes after every successful update or action.
    fn differs_from(&self, _published: &Self) -> bool {
        true
    }
}
