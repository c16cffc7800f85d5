//! ActorEntity implementation for the Order domain type.
//!
//! Placement is validated against the catalog in `on_create`; after that the
//! order only changes through [`OrderAction`]s, which the status state machine
//! guards.

use crate::clients::CatalogClient;
use crate::ledger;
use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::{OrderAction, OrderError, RejectReason};
use crate::status::OrderStatus;
use async_trait::async_trait;
use std::collections::HashSet;
use swad_framework::ActorEntity;
use tracing::{debug, info, warn};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = CatalogClient;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let totals = ledger::subtotal_of(&params.lines)
            .and_then(|subtotal| params.pricing.totals_for(subtotal))
            .map_err(|_| RejectReason::TotalTooLarge)?;
        Ok(Self {
            id,
            vendor_id: params.vendor_id,
            totals,
            lines: params.lines,
            payment_method: params.payment_method,
            status: OrderStatus::Confirmed,
            estimated_minutes: params.estimated_minutes,
            queue_position: params.queue_position,
        })
    }

    /// Checks every line against the vendor's current catalog.
    async fn on_create(&mut self, catalog: &CatalogClient) -> Result<(), Self::Error> {
        if self.lines.is_empty() {
            return Err(RejectReason::EmptyOrder.into());
        }
        if let Some(line) = self.lines.iter().find(|line| line.quantity == 0) {
            return Err(RejectReason::InvalidQuantity(line.item_id.clone()).into());
        }
        let mut seen = HashSet::new();
        for line in &self.lines {
            if !seen.insert(&line.item_id) {
                return Err(RejectReason::DuplicateLine(line.item_id.clone()).into());
            }
        }

        let vendor = catalog
            .get_vendor(self.vendor_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?
            .ok_or(RejectReason::UnknownVendor(self.vendor_id))?;

        for line in &self.lines {
            match vendor.item(&line.item_id) {
                None => return Err(RejectReason::UnknownItem(line.item_id.clone()).into()),
                Some(item) if !item.is_available => {
                    return Err(RejectReason::ItemUnavailable(line.item_id.clone()).into())
                }
                Some(_) => {}
            }
        }

        info!(order_id = %self.id, vendor_id = %self.vendor_id, total = self.totals.total, "Order accepted");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &CatalogClient) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &CatalogClient,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Advance(to) => self.move_to(to)?,
            OrderAction::Cancel => self.move_to(OrderStatus::Cancelled)?,
            OrderAction::ReportEta(minutes) => {
                if minutes < self.estimated_minutes {
                    debug!(order_id = %self.id, minutes, "ETA lowered");
                    self.estimated_minutes = minutes;
                }
            }
            OrderAction::ReportQueuePosition(position) => {
                if position < self.queue_position {
                    debug!(order_id = %self.id, position, "Queue position lowered");
                    self.queue_position = position;
                }
            }
        }
        Ok(self.clone())
    }

    fn is_settled(&self) -> bool {
        self.status.is_terminal()
    }

    fn differs_from(&self, published: &Self) -> bool {
        self != published
    }
}

impl Order {
    fn move_to(&mut self, to: OrderStatus) -> Result<(), OrderError> {
        match self.status.transition(to) {
            Ok(next) => {
                info!(order_id = %self.id, from = %self.status, to = %next, "Status changed");
                self.status = next;
                if next.has_reached(OrderStatus::Ready) {
                    self.estimated_minutes = 0;
                }
                Ok(())
            }
            Err(rejected) => {
                warn!(order_id = %self.id, error = %rejected, "Transition rejected");
                Err(rejected.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{CartLine, PricingConfig};
    use crate::model::{ItemId, PaymentMethod, VendorId};
    use swad_framework::mock::create_mock_client;

    fn momos(unit_price: u64, quantity: u32) -> OrderCreate {
        OrderCreate {
            vendor_id: VendorId(1),
            lines: vec![CartLine {
                item_id: ItemId::from("item1"),
                name: "Veg Momos (6 pcs)".to_string(),
                unit_price,
                is_veg: true,
                quantity,
            }],
            payment_method: PaymentMethod::Upi,
            pricing: PricingConfig::default(),
            estimated_minutes: 15,
            queue_position: 3,
        }
    }

    fn order() -> Order {
        Order::from_create_params(OrderId(12345), momos(80, 1)).unwrap()
    }

    fn catalog() -> CatalogClient {
        // These actions never reach the catalog.
        let (client, _receiver) = create_mock_client(1);
        CatalogClient::new(client)
    }

    #[test]
    fn totals_are_fixed_at_placement() {
        let order = order();
        assert_eq!(order.totals.total, 104);
        assert_eq!(order.status, OrderStatus::Confirmed);
    }

    #[test]
    fn totals_that_do_not_fit_are_rejected() {
        assert_eq!(
            Order::from_create_params(OrderId(1), momos(u64::MAX, 1)),
            Err(OrderError::Rejected(RejectReason::TotalTooLarge))
        );
        assert_eq!(
            Order::from_create_params(OrderId(1), momos(u64::MAX / 2, 3)),
            Err(OrderError::Rejected(RejectReason::TotalTooLarge))
        );
    }

    #[tokio::test]
    async fn backwards_transition_is_rejected_and_status_kept() {
        let mut order = order();
        let ctx = catalog();
        order.handle_action(OrderAction::Advance(OrderStatus::Preparing), &ctx).await.unwrap();
        order.handle_action(OrderAction::Advance(OrderStatus::Ready), &ctx).await.unwrap();

        let err = order
            .handle_action(OrderAction::Advance(OrderStatus::Confirmed), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition(_)));
        assert_eq!(order.status, OrderStatus::Ready);
        assert!(!order.is_settled());
    }

    #[tokio::test]
    async fn ready_orders_cannot_be_cancelled() {
        let mut order = order();
        let ctx = catalog();
        order.handle_action(OrderAction::Advance(OrderStatus::Preparing), &ctx).await.unwrap();
        order.handle_action(OrderAction::Advance(OrderStatus::Ready), &ctx).await.unwrap();

        assert!(order.handle_action(OrderAction::Cancel, &ctx).await.is_err());
        assert_eq!(order.status, OrderStatus::Ready);
    }

    #[tokio::test]
    async fn eta_and_queue_only_go_down() {
        let mut order = order();
        let ctx = catalog();

        let updated = order.handle_action(OrderAction::ReportEta(10), &ctx).await.unwrap();
        assert_eq!(updated.estimated_minutes, 10);
        let before = order.clone();
        let updated = order.handle_action(OrderAction::ReportEta(12), &ctx).await.unwrap();
        assert_eq!(updated.estimated_minutes, 10);
        assert!(!updated.differs_from(&before));

        order.handle_action(OrderAction::ReportQueuePosition(1), &ctx).await.unwrap();
        order.handle_action(OrderAction::ReportQueuePosition(4), &ctx).await.unwrap();
        assert_eq!(order.queue_position, 1);
    }

    #[tokio::test]
    async fn cancelled_orders_are_settled() {
        let mut order = order();
        let ctx = catalog();
        order.handle_action(OrderAction::Cancel, &ctx).await.unwrap();
        assert!(order.is_settled());
        assert!(order
            .handle_action(OrderAction::Advance(OrderStatus::Preparing), &ctx)
            .await
            .is_err());
    }
}
