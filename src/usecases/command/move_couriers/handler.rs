//! Move Couriers Handler
//!
//! ## Flow
//! 1. Snapshot all assigned orders
//! 2. For each order, in its own transaction: load the courier, advance it
//!    one tick toward the order location
//! 3. When the courier arrives, complete the order and clear the slot
//! 4. Persist both aggregates and commit before the next order

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::model::courier::CourierError;
use crate::domain::model::order::OrderError;
use crate::domain::ports::{
    CourierRepository, OrderRepository, RepositoryError, UnitOfWork, UnitOfWorkFactory,
};

use super::Command;

/// Errors that can occur during a movement pass
#[derive(Debug, Error)]
pub enum MoveCouriersError {
    /// An assigned order without a courier id is corrupt state
    #[error("Assigned order {0} has no courier")]
    MissingCourier(Uuid),

    /// Courier rule violation
    #[error("Courier error: {0}")]
    Courier(#[from] CourierError),

    /// Order rule violation
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Move Couriers Handler
pub struct Handler<F>
where
    F: UnitOfWorkFactory,
{
    uow_factory: Arc<F>,
}

impl<F> Handler<F>
where
    F: UnitOfWorkFactory,
{
    /// Create a new handler instance
    pub fn new(uow_factory: Arc<F>) -> Self {
        Self { uow_factory }
    }

    /// Handle the MoveCouriers command
    pub async fn handle(&self, _cmd: Command) -> Result<(), MoveCouriersError> {
        let uow = self.uow_factory.create().await?;

        let result = self.execute(&uow).await;

        if let Err(e) = uow.rollback_unless_committed().await {
            warn!(error = %e, "rollback after move couriers failed");
        }

        result
    }

    async fn execute(&self, uow: &F::Uow) -> Result<(), MoveCouriersError> {
        let orders = uow.order_repository();
        let couriers = uow.courier_repository();

        let assigned = orders.get_all_in_assigned_status().await?;

        for mut order in assigned {
            let courier_id = order
                .courier_id()
                .ok_or(MoveCouriersError::MissingCourier(order.id()))?;

            uow.begin().await?;

            let mut courier = couriers.get(courier_id).await?;

            courier.move_towards(order.location())?;

            if courier.location() == order.location() {
                order.complete()?;
                courier.complete_order(&order)?;
                debug!(order_id = %order.id(), courier_id = %courier.id(), "order delivered");
            }

            orders.update(&order).await?;
            couriers.update(&courier).await?;

            uow.commit().await?;
        }

        Ok(())
    }
}
