//! Move Couriers Job
//!
//! Runs one movement pass per tick, with the same skip-if-busy discipline
//! as the assignment job.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::domain::ports::UnitOfWorkFactory;
use crate::usecases::command::move_couriers;

/// Recommended movement period
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(2);

pub struct MoveCouriersJob<F>
where
    F: UnitOfWorkFactory,
{
    handler: Arc<move_couriers::Handler<F>>,
    period: Duration,
}

impl<F> MoveCouriersJob<F>
where
    F: UnitOfWorkFactory + 'static,
{
    pub fn new(handler: Arc<move_couriers::Handler<F>>, period: Duration) -> Self {
        Self { handler, period }
    }

    /// Run ticks until the shutdown signal fires. Tick errors are logged
    /// and swallowed; the next tick retries.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(period = ?self.period, "move couriers job started");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("move couriers job stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.handler.handle(move_couriers::Command::new()).await {
                        error!(error = %e, "move couriers tick failed");
                    }
                }
            }
        }
    }
}
