//! Courier Repository Port
//!
//! Defines the interface for persisting and retrieving Courier aggregates.
//! This port is implemented by infrastructure adapters (e.g., PostgreSQL).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::model::courier::Courier;

/// Errors that can occur during repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Aggregate lookup miss
    #[error("{0} not found: {1}")]
    NotFound(&'static str, Uuid),

    /// A guarded update matched no row (someone got there first)
    #[error("Concurrent update conflict on {0}: {1}")]
    Conflict(&'static str, Uuid),

    /// Writes must happen inside a transaction the unit of work controls
    #[error("Transaction error: {0}")]
    TransactionError(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Query execution error
    #[error("Query error: {0}")]
    QueryError(String),

    /// Row could not be mapped back into an aggregate
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RepositoryError {
    /// Whether this error is an aggregate lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound(_, _))
    }
}

/// Courier Repository Port
///
/// All operations participate in whatever transaction the owning unit of
/// work has opened; without one, reads run on the shared connection and
/// writes commit in a transaction of their own.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CourierRepository: Send + Sync {
    /// Insert a new courier together with its storage places
    async fn add(&self, courier: &Courier) -> Result<(), RepositoryError>;

    /// Save a changed courier; the stored storage-place set is replaced
    async fn update(&self, courier: &Courier) -> Result<(), RepositoryError>;

    /// Load a courier by ID
    async fn get(&self, id: Uuid) -> Result<Courier, RepositoryError>;

    /// Load every courier with at least one empty storage place
    async fn get_all_free(&self) -> Result<Vec<Courier>, RepositoryError>;
}
