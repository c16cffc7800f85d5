//! # Customer Session
//!
//! One customer's view of the system: the menu they have open, their cart
//! and checkout. The session owns the cart outright (it is never shared),
//! and talks to the actors only through the injected clients.

use crate::clients::{CatalogClient, OrderClient, OrderSubscription};
use crate::config::TrackingSettings;
use crate::ledger::{Cart, LedgerError, PricingConfig, Totals};
use crate::model::{ItemId, MenuFilter, MenuItem, Order, OrderCreate, OrderId, PaymentMethod, Vendor, VendorId};
use crate::order_actor::OrderError;
use crate::catalog_actor::CatalogError;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("No vendor menu is open")]
    NoOpenMenu,

    #[error("Item is not available right now: {0}")]
    ItemUnavailable(ItemId),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Order(#[from] OrderError),
}

#[derive(Debug)]
pub struct CustomerSession {
    catalog: CatalogClient,
    orders: OrderClient,
    pricing: PricingConfig,
    tracking: TrackingSettings,
    cart: Option<Cart>,
}

impl CustomerSession {
    pub fn new(
        catalog: CatalogClient,
        orders: OrderClient,
        pricing: PricingConfig,
        tracking: TrackingSettings,
    ) -> Self {
        Self {
            catalog,
            orders,
            pricing,
            tracking,
            cart: None,
        }
    }

    /// Opens a vendor's menu. A cart for another vendor is discarded; the
    /// cart for the same vendor is kept.
    #[instrument(skip(self))]
    pub async fn open_menu(&mut self, vendor_id: VendorId) -> Result<Vendor, SessionError> {
        let vendor = self
            .catalog
            .get_vendor(vendor_id)
            .await?
            .ok_or(CatalogError::VendorNotFound(vendor_id))?;
        match &self.cart {
            Some(cart) if cart.vendor_id() == vendor_id => {}
            Some(cart) => {
                info!(previous = %cart.vendor_id(), items = cart.item_count(), "Discarding cart for another vendor");
                self.cart = Some(Cart::new(vendor_id));
            }
            None => self.cart = Some(Cart::new(vendor_id)),
        }
        Ok(vendor)
    }

    pub async fn browse(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>, SessionError> {
        let vendor_id = self.open_cart()?.vendor_id();
        Ok(self.catalog.browse(vendor_id, filter).await?)
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.cart.as_ref()
    }

    /// Adds one unit of an item from the open menu, returning the new
    /// quantity.
    #[instrument(skip(self))]
    pub async fn add_item(&mut self, item_id: &ItemId) -> Result<u32, SessionError> {
        let vendor_id = self.open_cart()?.vendor_id();
        let item = self.catalog.get_menu_item(vendor_id, item_id).await?;
        if !item.is_available {
            return Err(SessionError::ItemUnavailable(item.id));
        }
        let quantity = self.open_cart_mut()?.add_item(&item);
        debug!(quantity, "Added to cart");
        Ok(quantity)
    }

    pub fn remove_item(&mut self, item_id: &ItemId) -> Result<u32, SessionError> {
        Ok(self.open_cart_mut()?.remove_item(item_id))
    }

    pub fn set_quantity(&mut self, item_id: &ItemId, quantity: u32) -> Result<(), SessionError> {
        Ok(self.open_cart_mut()?.set_quantity(item_id, quantity)?)
    }

    pub fn quantity(&self, item_id: &ItemId) -> u32 {
        self.cart.as_ref().map_or(0, |cart| cart.get_quantity(item_id))
    }

    pub fn totals(&self) -> Result<Totals, SessionError> {
        Ok(self.open_cart()?.compute_totals(&self.pricing)?)
    }

    /// Places the cart as an order. The cart is emptied only when the order
    /// is accepted; a rejection leaves it for the customer to fix.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self, payment_method: PaymentMethod) -> Result<Order, SessionError> {
        let cart = self.open_cart()?;
        let params = OrderCreate {
            vendor_id: cart.vendor_id(),
            lines: cart.lines().to_vec(),
            payment_method,
            pricing: self.pricing,
            estimated_minutes: self.tracking.estimated_minutes,
            queue_position: self.tracking.initial_queue_position,
        };
        let order = self.orders.place_order(params).await?;
        self.open_cart_mut()?.clear();
        info!(order_id = %order.id, total = order.totals.total, "Checked out");
        Ok(order)
    }

    pub async fn track(&self, order_id: OrderId) -> Result<OrderSubscription, SessionError> {
        Ok(self.orders.subscribe(order_id).await?)
    }

    fn open_cart(&self) -> Result<&Cart, SessionError> {
        self.cart.as_ref().ok_or(SessionError::NoOpenMenu)
    }

    fn open_cart_mut(&mut self) -> Result<&mut Cart, SessionError> {
        self.cart.as_mut().ok_or(SessionError::NoOpenMenu)
    }
}
