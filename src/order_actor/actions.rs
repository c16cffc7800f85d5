//! Custom actions for the Order actor.
//!
//! Each action returns the order as it is afterwards. A rejected action
//! leaves the order untouched.

use crate::status::OrderStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Move to `to`, if the state machine allows it from the current status.
    Advance(OrderStatus),
    /// Same as `Advance(Cancelled)`.
    Cancel,
    /// New ETA in minutes. Ignored unless lower than the current one.
    ReportEta(u32),
    /// New queue position. Ignored unless lower than the current one.
    ReportQueuePosition(u32),
}
