//! # Order Client
//!
//! Order submission, status changes and status subscriptions on top of the
//! order actor. Placement validation happens in the actor's `on_create`; this
//! client only shapes requests and maps errors back to [`OrderError`].

use crate::model::{Order, OrderCreate, OrderId, VendorId};
use crate::order_actor::{OrderAction, OrderError};
use crate::status::OrderStatus;
use async_trait::async_trait;
use swad_framework::{ActorClient, FrameworkError, ResourceClient};
use tokio::sync::watch;
use tracing::{debug, error, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(domain) => domain,
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Submits an order and returns it as stored.
    ///
    /// Rejections (`EmptyOrder`, `UnknownItem`, ...) come back as
    /// [`OrderError::Rejected`].
    #[instrument(skip(self, params), fields(vendor_id = %params.vendor_id, lines = params.lines.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        info!("Placing order");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.get_order(id).await
    }

    /// Like [`ActorClient::get`], but a missing order is an error.
    pub async fn get_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id).await?.ok_or(OrderError::NotFound(id))
    }

    /// Orders for one vendor, newest first.
    #[instrument(skip(self))]
    pub async fn orders_for_vendor(&self, vendor_id: VendorId) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|order| order.vendor_id == vendor_id)
            .collect();
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn advance_to(&self, id: OrderId, to: OrderStatus) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Advance(to)).await
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::Cancel).await
    }

    #[instrument(skip(self))]
    pub async fn report_eta(&self, id: OrderId, minutes: u32) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::ReportEta(minutes)).await
    }

    #[instrument(skip(self))]
    pub async fn report_queue_position(
        &self,
        id: OrderId,
        position: u32,
    ) -> Result<Order, OrderError> {
        self.perform(id, OrderAction::ReportQueuePosition(position))
            .await
    }

    /// Streams snapshots of one order until it completes or is cancelled.
    #[instrument(skip(self))]
    pub async fn subscribe(&self, id: OrderId) -> Result<OrderSubscription, OrderError> {
        debug!("Sending request");
        let receiver = self.inner.watch(id).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => OrderError::NotFound(id),
            other => Self::map_error(other),
        })?;
        Ok(OrderSubscription::new(receiver))
    }

    async fn perform(&self, id: OrderId, action: OrderAction) -> Result<Order, OrderError> {
        debug!(?action, "Sending request");
        let result = self
            .inner
            .perform_action(id, action)
            .await
            .map_err(|e| match e {
                FrameworkError::NotFound(_) => OrderError::NotFound(id),
                other => Self::map_error(other),
            });
        if let Err(OrderError::InvalidTransition(rejected)) = &result {
            error!(order_id = %id, error = %rejected, "Status change rejected");
        }
        result
    }
}

/// Snapshots of one order: the current state first, then each change.
///
/// Intermediate snapshots can be skipped when the consumer is slow; the
/// latest one is never lost. [`next`](Self::next) returns `None` after the
/// terminal snapshot has been delivered.
#[derive(Debug)]
pub struct OrderSubscription {
    receiver: watch::Receiver<Order>,
    primed: bool,
}

impl OrderSubscription {
    fn new(receiver: watch::Receiver<Order>) -> Self {
        Self {
            receiver,
            primed: false,
        }
    }

    pub async fn next(&mut self) -> Option<Order> {
        if !self.primed {
            self.primed = true;
            return Some(self.receiver.borrow_and_update().clone());
        }
        match self.receiver.changed().await {
            Ok(()) => Some(self.receiver.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// The latest snapshot, without waiting.
    pub fn current(&self) -> Order {
        self.receiver.borrow().clone()
    }

    /// Waits until the order reaches `stage` (or later) and returns that
    /// snapshot. `None` if the order ends without getting there.
    pub async fn wait_for(&mut self, stage: OrderStatus) -> Option<Order> {
        while let Some(order) = self.next().await {
            if order.status.has_reached(stage) {
                return Some(order);
            }
        }
        None
    }
}
