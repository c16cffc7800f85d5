//! # Order Tracking
//!
//! Simulated kitchen progress for the customer's tracking view. A
//! [`StatusScheduler`] task owns the clock; the order actor stays the only
//! place a status changes, and every change it makes still goes through the
//! state machine.

pub mod queue;
pub mod scheduler;

pub use queue::*;
pub use scheduler::*;
