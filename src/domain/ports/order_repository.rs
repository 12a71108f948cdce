//! Order Repository Port

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use uuid::Uuid;

use crate::domain::model::order::{Order, OrderStatus};

use super::courier_repository::RepositoryError;

/// Order Repository Port
///
/// All operations participate in whatever transaction the owning unit of
/// work has opened; without one, reads run on the shared connection and
/// writes commit in a transaction of their own.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a new order
    async fn add(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Save a changed order
    async fn update(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Save a changed order only if its stored status still matches
    /// `expected`; a missed match surfaces as `RepositoryError::Conflict`.
    async fn update_in_status(
        &self,
        order: &Order,
        expected: OrderStatus,
    ) -> Result<(), RepositoryError>;

    /// Load an order by ID
    async fn get(&self, id: Uuid) -> Result<Order, RepositoryError>;

    /// Load one order waiting for assignment, smallest id first for
    /// determinism; `None` when there is nothing to assign
    async fn get_first_in_created_status(&self) -> Result<Option<Order>, RepositoryError>;

    /// Load every order currently on a courier
    async fn get_all_in_assigned_status(&self) -> Result<Vec<Order>, RepositoryError>;
}
