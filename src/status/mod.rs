//! # Order Status State Machine
//!
//! The lifecycle of one placed order:
//!
//! ```text
//! confirmed ──► preparing ──► ready ──► completed
//!     │             │
//!     └─────────────┴──► cancelled
//! ```
//!
//! [`OrderStatus::transition`] only checks legality; it holds no timers.
//! Something outside (the vendor dashboard, or the
//! [`StatusScheduler`](crate::tracking::StatusScheduler)) decides when to move.
//! [`progress`] projects elapsed time onto a stage for the customer view.

pub mod progress;

pub use progress::*;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Confirmed,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

/// Rejected status change. The order keeps its current status.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("invalid transition from {from} to {to}")]
pub struct InvalidTransition {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn can_transition_to(self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Confirmed, Preparing)
                | (Preparing, Ready)
                | (Ready, Completed)
                | (Confirmed, Cancelled)
                | (Preparing, Cancelled)
        )
    }

    pub fn transition(self, to: OrderStatus) -> Result<OrderStatus, InvalidTransition> {
        if self.can_transition_to(to) {
            Ok(to)
        } else {
            Err(InvalidTransition { from: self, to })
        }
    }

    /// The forward successor, if there is one.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Completed),
            OrderStatus::Completed | OrderStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether `self` is `stage` or past it on the forward path.
    /// A cancelled order has reached no stage.
    pub fn has_reached(self, stage: OrderStatus) -> bool {
        match (self.forward_rank(), stage.forward_rank()) {
            (Some(current), Some(wanted)) => current >= wanted,
            _ => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn customer_stage(self) -> CustomerStage {
        match self {
            OrderStatus::Confirmed => CustomerStage::Confirmed,
            OrderStatus::Preparing => CustomerStage::Preparing,
            OrderStatus::Ready => CustomerStage::ReadyForPickup,
            OrderStatus::Completed => CustomerStage::Completed,
            OrderStatus::Cancelled => CustomerStage::Cancelled,
        }
    }

    fn forward_rank(self) -> Option<u8> {
        match self {
            OrderStatus::Confirmed => Some(0),
            OrderStatus::Preparing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Completed => Some(3),
            OrderStatus::Cancelled => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the customer's tracking page shows for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CustomerStage {
    Confirmed,
    Preparing,
    ReadyForPickup,
    Completed,
    Cancelled,
}

impl CustomerStage {
    pub fn label(self) -> &'static str {
        match self {
            CustomerStage::Confirmed => "Order Confirmed",
            CustomerStage::Preparing => "Preparing Your Order",
            CustomerStage::ReadyForPickup => "Order Ready for Pickup",
            CustomerStage::Completed => "Order Completed",
            CustomerStage::Cancelled => "Order Cancelled",
        }
    }
}
