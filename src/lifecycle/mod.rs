//! # System Lifecycle
//!
//! Starts the catalog and order actors, wires the catalog client into the
//! order actor, and hands out the customer and vendor front ends.

use crate::clients::{CatalogClient, OrderClient};
use crate::config::Settings;
use crate::dashboard::VendorDashboard;
use crate::model::{OrderId, VendorId};
use crate::session::CustomerSession;
use crate::tracking::{SteppedQueue, StatusScheduler, TrackingHandle};
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] JoinError),
}

/// The running order core.
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new(Settings::default());
/// let mut customer = system.customer_session();
/// customer.open_menu(vendor_id).await?;
/// customer.add_item(&"item1".into()).await?;
/// let order = customer.checkout(PaymentMethod::Upi).await?;
///
/// let tracking = system.track(order.id);
/// tracking.join().await?;
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub catalog_client: CatalogClient,
    pub order_client: OrderClient,
    settings: Settings,
    handles: Vec<JoinHandle<()>>,
}

impl OrderSystem {
    /// Spawns both actors. Must be called inside a Tokio runtime.
    pub fn new(settings: Settings) -> Self {
        let (catalog_actor, catalog) = crate::catalog_actor::new(settings.mailbox_size());
        let (order_actor, orders) = crate::order_actor::new(settings.mailbox_size());

        let catalog_client = CatalogClient::new(catalog);
        let order_client = OrderClient::new(orders);

        // The catalog has no dependencies; orders validate against it.
        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(catalog_client.clone()));

        info!(
            delivery_fee = settings.pricing.delivery_fee,
            tax_bps = settings.pricing.tax_rate.basis_points(),
            "Order system started"
        );
        Self {
            catalog_client,
            order_client,
            settings,
            // Order first: it holds a catalog client until it exits.
            handles: vec![order_handle, catalog_handle],
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn customer_session(&self) -> CustomerSession {
        CustomerSession::new(
            self.catalog_client.clone(),
            self.order_client.clone(),
            self.settings.pricing,
            self.settings.tracking.clone(),
        )
    }

    pub fn vendor_dashboard(&self, vendor_id: VendorId) -> VendorDashboard {
        VendorDashboard::new(vendor_id, self.order_client.clone())
    }

    /// Starts simulated progress for an order with the configured clock and
    /// a stepped queue feed.
    pub fn track(&self, order_id: OrderId) -> TrackingHandle {
        let tracking = &self.settings.tracking;
        StatusScheduler::spawn(
            self.order_client.clone(),
            order_id,
            tracking.plan(),
            SteppedQueue::new(tracking.initial_queue_position, tracking.queue_step_ticks),
            tracking.tick(),
        )
    }

    /// Drops the clients and waits for both actors to drain.
    ///
    /// Sessions, dashboards and tracking handles hold client clones; they
    /// must be gone (or joined) before this resolves.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.catalog_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
