//! # Generic Actor Server
//!
//! `ResourceActor` owns every entity of one type and processes requests one at
//! a time, so the store needs no locking. It also keeps a `watch` channel per
//! entity that somebody is watching and publishes a snapshot after each
//! successful update or action.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use swad_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] struct CounterUpdate;
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = CounterUpdate;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, hits: 0 })
///     }
///     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: takes the next id from the counter, builds the entity with
///   `from_create_params`, runs `on_create` and stores it only if both succeed.
/// * **Get** / **List**: clones out of the store.
/// * **Update** / **Action**: runs the hook on the stored entity, then
///   publishes the new snapshot to watchers if it differs from the last one.
/// * **Delete**: runs `on_delete`, removes the entity and closes its watch channel.
/// * **Watch**: returns a receiver holding the current snapshot. For a settled
///   entity the channel is already closed. Channels nobody listens to are
///   pruned first.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    watchers: HashMap<T::Id, watch::Sender<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait when
    /// it is full. Ids start at 1.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_first_id(buffer_size, 1)
    }

    /// Same as [`ResourceActor::new`] with ids counting up from `first_id`.
    pub fn with_first_id(buffer_size: usize, first_id: u32) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            watchers: HashMap::new(),
            next_id: first_id,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until every client
    /// has been dropped.
    ///
    /// The `context` is injected into every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "swadontime::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        publish(&mut self.watchers, &id, item);
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        self.store.remove(&id);
                        self.watchers.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => {
                                info!(entity_type, %id, "Action ok");
                                publish(&mut self.watchers, &id, item);
                            }
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Watch { id, respond_to } => match self.subscribe(&id) {
                    Some(receiver) => {
                        debug!(entity_type, %id, watched = self.watchers.len(), "Watch");
                        let _ = respond_to.send(Ok(receiver));
                    }
                    None => {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                },
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    /// A receiver holding the current snapshot of `id`, or `None` if there is
    /// no such entity. Channels whose receivers are all gone are pruned first.
    fn subscribe(&mut self, id: &T::Id) -> Option<watch::Receiver<T>> {
        self.watchers.retain(|_, sender| sender.receiver_count() > 0);
        let item = self.store.get(id)?;
        if item.is_settled() {
            // Closed on arrival: the receiver still holds the final snapshot.
            return Some(watch::channel(item.clone()).1);
        }
        let receiver = self
            .watchers
            .entry(id.clone())
            .or_insert_with(|| watch::channel(item.clone()).0)
            .subscribe();
        Some(receiver)
    }
}

/// Sends `item` to the entity's watchers if it differs from what they last
/// saw, dropping the channel once nobody listens anymore or the entity is
/// settled.
fn publish<T: ActorEntity>(watchers: &mut HashMap<T::Id, watch::Sender<T>>, id: &T::Id, item: &T) {
    let Some(sender) = watchers.get(id) else {
        return;
    };
    let sent = sender.send_if_modified(|published| {
        if !item.differs_from(published) {
            return false;
        }
        *published = item.clone();
        true
    });
    if !sent {
        debug!(%id, "Snapshot unchanged");
    }
    if item.is_settled() || sender.receiver_count() == 0 {
        watchers.remove(id);
        debug!(%id, "Watch closed");
    }
}
