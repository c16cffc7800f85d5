//! Vendor-side view of incoming orders.

use crate::clients::OrderClient;
use crate::model::{Order, OrderId, VendorId};
use crate::order_actor::OrderError;
use crate::status::OrderStatus;
use serde::Serialize;
use tracing::instrument;

/// Status tab on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderFilter {
    #[default]
    All,
    Status(OrderStatus),
}

impl OrderFilter {
    pub fn matches(self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::Status(status) => order.status == status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    /// Confirmed, not yet started.
    pub pending_orders: usize,
    /// Preparing or ready.
    pub active_orders: usize,
    /// Sum of totals over orders that were not cancelled.
    pub revenue: u64,
}

impl DashboardStats {
    pub fn from_orders(orders: &[Order]) -> Self {
        orders.iter().fold(Self::default(), |mut stats, order| {
            stats.total_orders += 1;
            match order.status {
                OrderStatus::Confirmed => stats.pending_orders += 1,
                OrderStatus::Preparing | OrderStatus::Ready => stats.active_orders += 1,
                OrderStatus::Completed | OrderStatus::Cancelled => {}
            }
            if order.status != OrderStatus::Cancelled {
                stats.revenue = stats.revenue.saturating_add(order.totals.total);
            }
            stats
        })
    }
}

/// Buttons the dashboard offers for an order in a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VendorAction {
    StartPreparing,
    MarkReady,
    Complete,
    Cancel,
}

impl VendorAction {
    pub fn available_for(status: OrderStatus) -> &'static [VendorAction] {
        match status {
            OrderStatus::Confirmed => &[VendorAction::StartPreparing, VendorAction::Cancel],
            OrderStatus::Preparing => &[VendorAction::MarkReady],
            OrderStatus::Ready => &[VendorAction::Complete],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VendorAction::StartPreparing => "Start Preparing",
            VendorAction::MarkReady => "Mark as Ready",
            VendorAction::Complete => "Complete Order",
            VendorAction::Cancel => "Cancel",
        }
    }
}

/// Order management for one vendor. Orders of other vendors are invisible:
/// acting on one reports `NotFound`.
#[derive(Debug, Clone)]
pub struct VendorDashboard {
    vendor_id: VendorId,
    orders: OrderClient,
}

impl VendorDashboard {
    pub fn new(vendor_id: VendorId, orders: OrderClient) -> Self {
        Self { vendor_id, orders }
    }

    pub fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    /// Newest first.
    pub async fn orders(&self, filter: OrderFilter) -> Result<Vec<Order>, OrderError> {
        let mut orders = self.orders.orders_for_vendor(self.vendor_id).await?;
        orders.retain(|order| filter.matches(order));
        Ok(orders)
    }

    pub async fn stats(&self) -> Result<DashboardStats, OrderError> {
        let orders = self.orders.orders_for_vendor(self.vendor_id).await?;
        Ok(DashboardStats::from_orders(&orders))
    }

    pub async fn perform(&self, order_id: OrderId, action: VendorAction) -> Result<Order, OrderError> {
        match action {
            VendorAction::StartPreparing => self.start_preparing(order_id).await,
            VendorAction::MarkReady => self.mark_ready(order_id).await,
            VendorAction::Complete => self.complete(order_id).await,
            VendorAction::Cancel => self.cancel(order_id).await,
        }
    }

    #[instrument(skip(self), fields(vendor_id = %self.vendor_id))]
    pub async fn start_preparing(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.own(order_id).await?;
        self.orders.advance_to(order_id, OrderStatus::Preparing).await
    }

    #[instrument(skip(self), fields(vendor_id = %self.vendor_id))]
    pub async fn mark_ready(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.own(order_id).await?;
        self.orders.advance_to(order_id, OrderStatus::Ready).await
    }

    #[instrument(skip(self), fields(vendor_id = %self.vendor_id))]
    pub async fn complete(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.own(order_id).await?;
        self.orders.advance_to(order_id, OrderStatus::Completed).await
    }

    #[instrument(skip(self), fields(vendor_id = %self.vendor_id))]
    pub async fn cancel(&self, order_id: OrderId) -> Result<Order, OrderError> {
        self.own(order_id).await?;
        self.orders.cancel(order_id).await
    }

    async fn own(&self, order_id: OrderId) -> Result<Order, OrderError> {
        let order = self.orders.get_order(order_id).await?;
        if order.vendor_id != self.vendor_id {
            return Err(OrderError::NotFound(order_id));
        }
        Ok(order)
    }
}
