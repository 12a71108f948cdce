//! Unit of Work Port
//!
//! A unit of work spans one use-case invocation and groups repository
//! writes into a single atomic commit. The two repositories returned by one
//! unit of work share exactly the same transactional context.

use async_trait::async_trait;

use super::courier_repository::{CourierRepository, RepositoryError};
use super::order_repository::OrderRepository;

/// Transaction scope shared by the courier and order repositories.
///
/// Reads issued before `begin` run on the shared connection; every write of
/// a handler call must happen between `begin` and `commit` so it either
/// becomes visible atomically or not at all.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Couriers: CourierRepository;
    type Orders: OrderRepository;

    /// Courier repository bound to this unit of work
    fn courier_repository(&self) -> Self::Couriers;

    /// Order repository bound to this unit of work
    fn order_repository(&self) -> Self::Orders;

    /// Open the transaction. Opening twice is an error.
    async fn begin(&self) -> Result<(), RepositoryError>;

    /// Commit the open transaction, making all writes visible atomically.
    async fn commit(&self) -> Result<(), RepositoryError>;

    /// Roll back iff a transaction is open and was not committed.
    ///
    /// Called on every exit path of a handler; a no-op after `commit` or
    /// when no transaction was ever opened.
    async fn rollback_unless_committed(&self) -> Result<(), RepositoryError>;

    /// Whether a transaction is currently open.
    async fn in_tx(&self) -> bool;
}

/// Creates a fresh unit of work per use case.
///
/// A unit of work must not be shared across concurrent requests.
#[async_trait]
pub trait UnitOfWorkFactory: Send + Sync {
    type Uow: UnitOfWork;

    async fn create(&self) -> Result<Self::Uow, RepositoryError>;
}
