//! Assign Orders Job
//!
//! Runs one assignment pass per tick. The handler is awaited inline on a
//! single task with skipped missed ticks, so a pass that outlasts its
//! period is never queued behind a second one.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::domain::ports::UnitOfWorkFactory;
use crate::usecases::command::assign_orders;

/// Recommended assignment period
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

pub struct AssignOrdersJob<F>
where
    F: UnitOfWorkFactory,
{
    handler: Arc<assign_orders::Handler<F>>,
    period: Duration,
}

impl<F> AssignOrdersJob<F>
where
    F: UnitOfWorkFactory + 'static,
{
    pub fn new(handler: Arc<assign_orders::Handler<F>>, period: Duration) -> Self {
        Self { handler, period }
    }

    /// Run ticks until the shutdown signal fires. Tick errors are logged
    /// and swallowed; the next tick retries.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(period = ?self.period, "assign orders job started");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("assign orders job stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.handler.handle(assign_orders::Command::new()).await {
                        error!(error = %e, "assign orders tick failed");
                    }
                }
            }
        }
    }
}
