//! Interval task that moves a tracked order along its progress plan.

use crate::clients::OrderClient;
use crate::model::{Order, OrderId};
use crate::order_actor::OrderError;
use crate::status::{OrderStatus, ProgressPlan, Projection};
use crate::tracking::QueueFeed;
use std::time::Duration;
use swad_framework::ActorClient;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn, Instrument};

/// How a tracking task ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingOutcome {
    /// The estimate ran out with the order ready for pickup.
    Ready(Order),
    /// The order completed or was cancelled while being tracked.
    Settled(OrderStatus),
    /// The order no longer exists.
    Gone,
    /// Stopped through the handle.
    Stopped,
    /// The order actor could not be reached.
    Failed(OrderError),
}

/// Drives one order: every tick it projects elapsed time onto the plan,
/// reports the lower ETA and queue position, and advances the status one
/// legal step at a time until it matches the projected stage. It never moves
/// an order past `ready`; pickup is the vendor's call.
pub struct StatusScheduler;

impl StatusScheduler {
    /// Starts tracking on the current runtime. The first tick fires at once.
    pub fn spawn<Q: QueueFeed>(
        orders: OrderClient,
        order_id: OrderId,
        plan: ProgressPlan,
        queue: Q,
        tick: Duration,
    ) -> TrackingHandle {
        let (stop, stopped) = oneshot::channel();
        let span = tracing::info_span!("tracking", %order_id);
        let task = tokio::spawn(run(orders, order_id, plan, queue, tick, stopped).instrument(span));
        TrackingHandle {
            stop: Some(stop),
            task,
        }
    }
}

/// Owner of a running tracking task.
///
/// Dropping the handle stops the task at its next await point, so a
/// tracking view that goes away leaves no timer behind.
#[derive(Debug)]
pub struct TrackingHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<TrackingOutcome>,
}

impl TrackingHandle {
    pub fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task to end on its own (or after [`stop`](Self::stop)).
    pub async fn join(self) -> Result<TrackingOutcome, JoinError> {
        let TrackingHandle { stop, task } = self;
        let outcome = task.await;
        drop(stop);
        outcome
    }
}

enum Step {
    Continue,
    Finished(TrackingOutcome),
}

async fn run<Q: QueueFeed>(
    orders: OrderClient,
    order_id: OrderId,
    plan: ProgressPlan,
    mut queue: Q,
    tick: Duration,
    mut stopped: oneshot::Receiver<()>,
) -> TrackingOutcome {
    info!(estimated_minutes = plan.estimated_minutes, ?tick, "Tracking started");
    let started = Instant::now();
    let mut interval = time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks: u64 = 0;

    loop {
        tokio::select! {
            // Fires on stop() and when the handle is dropped.
            _ = &mut stopped => {
                info!("Tracking stopped");
                return TrackingOutcome::Stopped;
            }
            _ = interval.tick() => {}
        }

        let projection = plan.project(started.elapsed());
        let hint = queue.queue_position(&order_id, ticks);
        ticks += 1;

        match step(&orders, order_id, &projection, hint).await {
            Ok(Step::Continue) => {}
            Ok(Step::Finished(outcome)) => {
                info!(?outcome, ticks, "Tracking finished");
                return outcome;
            }
            Err(e) => {
                warn!(error = %e, "Tracking failed");
                return TrackingOutcome::Failed(e);
            }
        }
    }
}

async fn step(
    orders: &OrderClient,
    order_id: OrderId,
    projection: &Projection,
    queue_hint: Option<u32>,
) -> Result<Step, OrderError> {
    let Some(mut order) = orders.get(order_id).await? else {
        return Ok(Step::Finished(TrackingOutcome::Gone));
    };
    if order.status.is_terminal() {
        return Ok(Step::Finished(TrackingOutcome::Settled(order.status)));
    }
    debug!(
        percent = projection.percent,
        remaining = projection.remaining_minutes,
        stage = %projection.stage,
        status = %order.status,
        "Tick"
    );

    if projection.remaining_minutes < order.estimated_minutes {
        order = orders
            .report_eta(order_id, projection.remaining_minutes)
            .await?;
    }
    if let Some(position) = queue_hint.filter(|position| *position < order.queue_position) {
        order = orders.report_queue_position(order_id, position).await?;
    }

    while !order.status.has_reached(projection.stage) {
        let Some(next) = order.status.next() else {
            break;
        };
        match orders.advance_to(order_id, next).await {
            Ok(advanced) => order = advanced,
            // Someone else moved it (e.g. the vendor cancelled); re-read next tick.
            Err(OrderError::InvalidTransition(_)) => return Ok(Step::Continue),
            Err(OrderError::NotFound(_)) => return Ok(Step::Finished(TrackingOutcome::Gone)),
            Err(e) => return Err(e),
        }
    }

    if projection.is_complete() && order.status == OrderStatus::Ready {
        return Ok(Step::Finished(TrackingOutcome::Ready(order)));
    }
    Ok(Step::Continue)
}
