//! Port Interfaces
//!
//! Defines the contracts (traits) for infrastructure adapters.

pub mod courier_repository;
pub mod geo_client;
pub mod location_provider;
pub mod order_repository;
pub mod unit_of_work;

pub use courier_repository::{CourierRepository, RepositoryError};
pub use geo_client::{GeoClient, GeoClientError};
pub use location_provider::{LocationProvider, RandomLocationProvider};
pub use order_repository::OrderRepository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};

#[cfg(test)]
pub use courier_repository::MockCourierRepository;
#[cfg(test)]
pub use geo_client::MockGeoClient;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
