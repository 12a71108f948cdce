//! Geocoding Port
//!
//! Resolves a street address to a grid location via an external service.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::model::vo::location::LocationError;
use crate::domain::model::vo::Location;

/// Geocoding errors
#[derive(Debug, Error)]
pub enum GeoClientError {
    /// Transport-level failure (connection, protocol, remote status)
    #[error("Geocoding transport error: {0}")]
    Transport(String),

    /// The call exceeded the client's deadline
    #[error("Geocoding deadline exceeded")]
    Timeout,

    /// The service answered with off-grid coordinates
    #[error("Geocoding returned an invalid location: {0}")]
    InvalidLocation(#[from] LocationError),
}

/// Geocoding Port
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeoClient: Send + Sync {
    /// Resolve a street to a location on the grid.
    async fn get_location(&self, street: &str) -> Result<Location, GeoClientError>;
}
