//! Create Order Handler
//!
//! ## Flow
//! 1. If an order with this id already exists, succeed without doing
//!    anything (the event bus delivers at least once)
//! 2. Resolve the street to a grid location via the geocoding port
//! 3. Construct the Order aggregate and add it through the unit of work

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::model::order::{Order, OrderError};
use crate::domain::ports::{
    GeoClient, GeoClientError, OrderRepository, RepositoryError, UnitOfWork, UnitOfWorkFactory,
};

use super::Command;

/// Errors that can occur while creating an order
#[derive(Debug, Error)]
pub enum CreateOrderError {
    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] OrderError),

    /// Geocoding error
    #[error("Geocoding error: {0}")]
    Geo(#[from] GeoClientError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create Order Handler
pub struct Handler<F, G>
where
    F: UnitOfWorkFactory,
    G: GeoClient,
{
    uow_factory: Arc<F>,
    geo_client: Arc<G>,
}

impl<F, G> Handler<F, G>
where
    F: UnitOfWorkFactory,
    G: GeoClient,
{
    /// Create a new handler instance
    pub fn new(uow_factory: Arc<F>, geo_client: Arc<G>) -> Self {
        Self {
            uow_factory,
            geo_client,
        }
    }

    /// Handle the CreateOrder command
    pub async fn handle(&self, cmd: Command) -> Result<(), CreateOrderError> {
        let uow = self.uow_factory.create().await?;

        let result = self.execute(&uow, cmd).await;

        if let Err(e) = uow.rollback_unless_committed().await {
            warn!(error = %e, "rollback after create order failed");
        }

        result
    }

    async fn execute(&self, uow: &F::Uow, cmd: Command) -> Result<(), CreateOrderError> {
        let orders = uow.order_repository();

        match orders.get(cmd.order_id()).await {
            Ok(_) => {
                debug!(order_id = %cmd.order_id(), "order already exists, nothing to do");
                return Ok(());
            }
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }

        let location = self.geo_client.get_location(cmd.street()).await?;

        let order = Order::new(cmd.order_id(), location, cmd.volume())?;

        orders.add(&order).await?;

        Ok(())
    }
}
