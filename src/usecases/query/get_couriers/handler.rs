//! Get Couriers Handler
//!
//! Read model for operator tooling. Bypasses the repositories and reads the
//! courier rows straight from the shared connection.

use sea_orm::{DatabaseConnection, DbBackend, FromQueryResult, Statement};
use thiserror::Error;
use uuid::Uuid;

use super::Query;

/// Errors that can occur while reading the courier list
#[derive(Debug, Error)]
pub enum GetCouriersError {
    #[error("Query error: {0}")]
    Db(#[from] sea_orm::DbErr),
}

/// One courier row of the read model
#[derive(Debug, Clone, FromQueryResult)]
pub struct CourierRow {
    pub id: Uuid,
    pub name: String,
    pub location_x: i32,
    pub location_y: i32,
}

/// Response with all couriers
#[derive(Debug, Clone)]
pub struct Response {
    pub couriers: Vec<CourierRow>,
}

/// Get Couriers Handler
pub struct Handler {
    db: DatabaseConnection,
}

impl Handler {
    /// Create a new handler instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Handle the GetCouriers query
    pub async fn handle(&self, _query: Query) -> Result<Response, GetCouriersError> {
        let couriers = CourierRow::find_by_statement(Statement::from_string(
            DbBackend::Postgres,
            "SELECT id, name, location_x, location_y FROM couriers",
        ))
        .all(&self.db)
        .await?;

        Ok(Response { couriers })
    }
}
