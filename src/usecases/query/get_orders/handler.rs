//! Get Orders Handler
//!
//! Read model for operator tooling. Bypasses the repositories and reads the
//! order rows straight from the shared connection; completed orders are
//! filtered out.

use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::model::order::OrderStatus;

use super::Query;

/// Errors that can occur while reading the order list
#[derive(Debug, Error)]
pub enum GetOrdersError {
    #[error("Query error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

/// One order row of the read model
#[derive(Debug, Clone, FromQueryResult)]
pub struct OrderRow {
    pub id: Uuid,
    pub location_x: i32,
    pub location_y: i32,
}

/// Response with all not-yet-completed orders
#[derive(Debug, Clone)]
pub struct Response {
    pub orders: Vec<OrderRow>,
}

/// Get Orders Handler
pub struct Handler {
    db: DatabaseConnection,
}

impl Handler {
    /// Create a new handler instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Handle the GetOrders query
    pub async fn handle(&self, _query: Query) -> Result<Response, GetOrdersError> {
        let orders = OrderRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            "SELECT id, location_x, location_y FROM orders WHERE status <> $1",
            [OrderStatus::Completed.as_str().into()],
        ))
        .all(&self.db)
        .await?;

        Ok(Response { orders })
    }
}
