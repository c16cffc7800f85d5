use crate::ledger::{CartLine, PricingConfig, Totals};
use crate::model::{OrderId, VendorId};
use crate::status::OrderStatus;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Cash,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Upi => f.write_str("upi"),
            PaymentMethod::Cash => f.write_str("cash"),
        }
    }
}

/// A placed order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](swad_framework::ActorEntity)
/// trait and is managed by the order actor. Status, ETA and queue position
/// change only through [`OrderAction`](crate::order_actor::OrderAction)s.
///
/// `lines` and `totals` are fixed at placement: later catalog edits do not
/// touch them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub vendor_id: VendorId,
    pub lines: Vec<CartLine>,
    pub payment_method: PaymentMethod,
    pub totals: Totals,
    pub status: OrderStatus,
    /// Minutes until ready. Only ever lowered.
    pub estimated_minutes: u32,
    /// Orders ahead of this one. A display hint, only ever lowered.
    pub queue_position: u32,
}

/// Payload for placing an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub vendor_id: VendorId,
    pub lines: Vec<CartLine>,
    pub payment_method: PaymentMethod,
    pub pricing: PricingConfig,
    pub estimated_minutes: u32,
    pub queue_position: u32,
}

impl Order {
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }
}
