//! Create Courier Handler
//!
//! ## Flow
//! 1. Pick a start location from the injected provider
//! 2. Construct the Courier aggregate
//! 3. Add it through the unit of work

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::domain::model::courier::{Courier, CourierError};
use crate::domain::ports::{
    CourierRepository, LocationProvider, RepositoryError, UnitOfWork, UnitOfWorkFactory,
};

use super::Command;

/// Errors that can occur while creating a courier
#[derive(Debug, Error)]
pub enum CreateCourierError {
    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] CourierError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Create Courier Handler
pub struct Handler<F, L>
where
    F: UnitOfWorkFactory,
    L: LocationProvider,
{
    uow_factory: Arc<F>,
    location_provider: Arc<L>,
}

impl<F, L> Handler<F, L>
where
    F: UnitOfWorkFactory,
    L: LocationProvider,
{
    /// Create a new handler instance
    pub fn new(uow_factory: Arc<F>, location_provider: Arc<L>) -> Self {
        Self {
            uow_factory,
            location_provider,
        }
    }

    /// Handle the CreateCourier command
    pub async fn handle(&self, cmd: Command) -> Result<(), CreateCourierError> {
        let uow = self.uow_factory.create().await?;

        let result = self.execute(&uow, cmd).await;

        if let Err(e) = uow.rollback_unless_committed().await {
            warn!(error = %e, "rollback after create courier failed");
        }

        result
    }

    async fn execute(&self, uow: &F::Uow, cmd: Command) -> Result<(), CreateCourierError> {
        let location = self.location_provider.next_location();

        let courier = Courier::new(cmd.name(), cmd.speed(), location)?;

        uow.courier_repository().add(&courier).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::vo::Location;
    use crate::usecases::support::{FixedLocationProvider, InMemoryUnitOfWorkFactory};

    #[tokio::test]
    async fn test_handle_creates_courier_at_provided_location() {
        let factory = Arc::new(InMemoryUnitOfWorkFactory::new());
        let provider = Arc::new(FixedLocationProvider::new(Location::new(4, 7).unwrap()));
        let handler = Handler::new(factory.clone(), provider);

        handler.handle(Command::new("Bob", 2).unwrap()).await.unwrap();

        let couriers = factory.store().all_couriers();
        assert_eq!(couriers.len(), 1);
        assert_eq!(couriers[0].name(), "Bob");
        assert_eq!(couriers[0].speed(), 2);
        assert_eq!(couriers[0].location(), Location::new(4, 7).unwrap());
        assert_eq!(couriers[0].storage_places().len(), 1);
    }
}
