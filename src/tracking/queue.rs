//! Queue-position feeds for the tracking view.
//!
//! The position is a display hint from outside the order core. The order
//! actor only accepts lower values, so a feed can be noisy without making
//! the number jump back up.

use crate::model::OrderId;

/// Source of "orders ahead of you" for one tracked order.
pub trait QueueFeed: Send + 'static {
    /// Position to report at `tick`, or `None` for no news.
    fn queue_position(&mut self, order_id: &OrderId, tick: u64) -> Option<u32>;
}

impl<F> QueueFeed for F
where
    F: FnMut(&OrderId, u64) -> Option<u32> + Send + 'static,
{
    fn queue_position(&mut self, order_id: &OrderId, tick: u64) -> Option<u32> {
        self(order_id, tick)
    }
}

/// Moves one place forward every `every_ticks` ticks until it reaches 0.
#[derive(Debug, Clone)]
pub struct SteppedQueue {
    position: u32,
    every_ticks: u64,
}

impl SteppedQueue {
    pub fn new(start: u32, every_ticks: u64) -> Self {
        Self {
            position: start,
            every_ticks: every_ticks.max(1),
        }
    }
}

impl QueueFeed for SteppedQueue {
    fn queue_position(&mut self, _order_id: &OrderId, tick: u64) -> Option<u32> {
        if tick > 0 && tick % self.every_ticks == 0 {
            self.position = self.position.saturating_sub(1);
        }
        Some(self.position)
    }
}
