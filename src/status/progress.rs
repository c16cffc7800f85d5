//! ETA and progress projection for the customer tracking view.
//!
//! Pure arithmetic over elapsed time: the caller supplies the clock.

use crate::status::OrderStatus;
use serde::Serialize;
use std::time::Duration;

const START_PERCENT: u128 = 25;
const PREPARING_ABOVE: u8 = 25;
const READY_ABOVE: u8 = 75;

/// How long an order should take, and how long one "minute" lasts.
///
/// `minute` is normally 60 seconds; demos and tests shrink it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPlan {
    pub estimated_minutes: u32,
    pub minute: Duration,
}

/// Snapshot of where an order should be after some elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Projection {
    /// Whole minutes left, rounded up. Zero once the estimate has passed.
    pub remaining_minutes: u32,
    /// 25 at placement, 100 at the estimate.
    pub percent: u8,
    /// `Confirmed`, `Preparing` or `Ready`.
    pub stage: OrderStatus,
}

impl Projection {
    pub fn is_complete(&self) -> bool {
        self.remaining_minutes == 0
    }
}

impl ProgressPlan {
    pub fn new(estimated_minutes: u32, minute: Duration) -> Self {
        Self {
            estimated_minutes,
            minute,
        }
    }

    pub fn total(&self) -> Duration {
        self.minute.saturating_mul(self.estimated_minutes)
    }

    pub fn project(&self, elapsed: Duration) -> Projection {
        let total = self.total().as_nanos();
        let minute = self.minute.as_nanos();
        if total == 0 || elapsed.as_nanos() >= total {
            return Projection {
                remaining_minutes: 0,
                percent: 100,
                stage: OrderStatus::Ready,
            };
        }

        let elapsed = elapsed.as_nanos();
        let left = total - elapsed;
        let remaining_minutes = u32::try_from(left.div_ceil(minute)).unwrap_or(u32::MAX);
        let percent = (START_PERCENT + (100 - START_PERCENT) * elapsed / total) as u8;

        let stage = if percent > READY_ABOVE {
            OrderStatus::Ready
        } else if percent > PREPARING_ABOVE {
            OrderStatus::Preparing
        } else {
            OrderStatus::Confirmed
        };

        Projection {
            remaining_minutes,
            percent,
            stage,
        }
    }
}
