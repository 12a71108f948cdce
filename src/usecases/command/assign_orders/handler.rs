//! Assign Orders Handler
//!
//! ## Flow
//! 1. Fetch one order waiting for assignment; none is a success
//! 2. Fetch all free couriers; none is a success
//! 3. Run the dispatcher to pair the order with a courier
//! 4. Persist both aggregates in one transaction; the order write is
//!    guarded by its stored status so the same order can never be
//!    dispatched twice

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::model::order::OrderStatus;
use crate::domain::ports::{
    CourierRepository, OrderRepository, RepositoryError, UnitOfWork, UnitOfWorkFactory,
};
use crate::domain::services::{DispatchError, OrderDispatcher};

use super::Command;

/// Errors that can occur during an assignment pass
#[derive(Debug, Error)]
pub enum AssignOrdersError {
    /// Dispatch error
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Assign Orders Handler
pub struct Handler<F>
where
    F: UnitOfWorkFactory,
{
    uow_factory: Arc<F>,
    dispatcher: OrderDispatcher,
}

impl<F> Handler<F>
where
    F: UnitOfWorkFactory,
{
    /// Create a new handler instance
    pub fn new(uow_factory: Arc<F>, dispatcher: OrderDispatcher) -> Self {
        Self {
            uow_factory,
            dispatcher,
        }
    }

    /// Handle the AssignOrders command
    pub async fn handle(&self, _cmd: Command) -> Result<(), AssignOrdersError> {
        let uow = self.uow_factory.create().await?;

        let result = self.execute(&uow).await;

        if let Err(e) = uow.rollback_unless_committed().await {
            warn!(error = %e, "rollback after assign orders failed");
        }

        result
    }

    async fn execute(&self, uow: &F::Uow) -> Result<(), AssignOrdersError> {
        let orders = uow.order_repository();
        let couriers_repo = uow.courier_repository();

        let Some(mut order) = orders.get_first_in_created_status().await? else {
            return Ok(());
        };

        let mut couriers = couriers_repo.get_all_free().await?;
        if couriers.is_empty() {
            return Ok(());
        }

        let courier = self.dispatcher.dispatch(&mut order, &mut couriers)?;

        debug!(order_id = %order.id(), courier_id = %courier.id(), "order dispatched");

        uow.begin().await?;

        couriers_repo.update(courier).await?;
        orders.update_in_status(&order, OrderStatus::Created).await?;

        uow.commit().await?;

        Ok(())
    }
}
