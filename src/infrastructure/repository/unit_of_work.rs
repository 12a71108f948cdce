//! PostgreSQL Unit of Work
//!
//! Owns the optional database transaction that both repositories run on.
//! A unit of work is created per use-case invocation and must not be shared
//! across concurrent requests; the internal lock serializes access to the
//! single transaction connection.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::sync::Mutex;

use crate::domain::ports::{RepositoryError, UnitOfWork, UnitOfWorkFactory};

use super::courier_postgres::CourierPostgresRepository;
use super::order_postgres::OrderPostgresRepository;

/// Transaction slot shared by the repositories of one unit of work.
pub(crate) enum TxState {
    /// No transaction was opened (or the last one rolled back)
    None,
    /// A transaction is open; all repository calls run on it
    Open(DatabaseTransaction),
    /// The transaction committed; reads fall back to the connection
    Committed,
}

pub(crate) struct UowInner {
    pub(crate) db: DatabaseConnection,
    pub(crate) tx: Mutex<TxState>,
}

/// PostgreSQL implementation of the unit of work.
pub struct PostgresUnitOfWork {
    inner: Arc<UowInner>,
}

impl PostgresUnitOfWork {
    /// Create a unit of work on the shared connection.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            inner: Arc::new(UowInner {
                db,
                tx: Mutex::new(TxState::None),
            }),
        }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    type Couriers = CourierPostgresRepository;
    type Orders = OrderPostgresRepository;

    fn courier_repository(&self) -> Self::Couriers {
        CourierPostgresRepository::new(self.inner.clone())
    }

    fn order_repository(&self) -> Self::Orders {
        OrderPostgresRepository::new(self.inner.clone())
    }

    async fn begin(&self) -> Result<(), RepositoryError> {
        let mut guard = self.inner.tx.lock().await;

        if matches!(*guard, TxState::Open(_)) {
            return Err(RepositoryError::TransactionError(
                "transaction already open".to_string(),
            ));
        }

        let tx = self
            .inner
            .db
            .begin()
            .await
            .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;
        *guard = TxState::Open(tx);

        Ok(())
    }

    async fn commit(&self) -> Result<(), RepositoryError> {
        let mut guard = self.inner.tx.lock().await;

        match std::mem::replace(&mut *guard, TxState::Committed) {
            TxState::Open(tx) => tx
                .commit()
                .await
                .map_err(|e| RepositoryError::TransactionError(e.to_string())),
            other => {
                *guard = other;
                Err(RepositoryError::TransactionError(
                    "no open transaction to commit".to_string(),
                ))
            }
        }
    }

    async fn rollback_unless_committed(&self) -> Result<(), RepositoryError> {
        let mut guard = self.inner.tx.lock().await;

        match std::mem::replace(&mut *guard, TxState::None) {
            TxState::Open(tx) => tx
                .rollback()
                .await
                .map_err(|e| RepositoryError::TransactionError(e.to_string())),
            TxState::Committed => {
                *guard = TxState::Committed;
                Ok(())
            }
            TxState::None => Ok(()),
        }
    }

    async fn in_tx(&self) -> bool {
        matches!(*self.inner.tx.lock().await, TxState::Open(_))
    }
}

/// Creates a fresh PostgreSQL unit of work per use case.
pub struct PostgresUnitOfWorkFactory {
    db: DatabaseConnection,
}

impl PostgresUnitOfWorkFactory {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWorkFactory for PostgresUnitOfWorkFactory {
    type Uow = PostgresUnitOfWork;

    async fn create(&self) -> Result<Self::Uow, RepositoryError> {
        Ok(PostgresUnitOfWork::new(self.db.clone()))
    }
}
