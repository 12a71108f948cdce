//! PostgreSQL Implementation of OrderRepository
//!
//! Uses Sea-ORM. Queries run on the unit of work's transaction when one is
//! open and on the shared connection otherwise; writes issued outside a
//! transaction commit in one of their own.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::model::order::{Order, OrderStatus};
use crate::domain::ports::{OrderRepository, RepositoryError};

use super::entities::order;
use super::unit_of_work::{TxState, UowInner};

/// PostgreSQL implementation of OrderRepository bound to one unit of work
pub struct OrderPostgresRepository {
    uow: Arc<UowInner>,
}

impl OrderPostgresRepository {
    pub(crate) fn new(uow: Arc<UowInner>) -> Self {
        Self { uow }
    }

    async fn insert<C: ConnectionTrait>(conn: &C, aggregate: &Order) -> Result<(), RepositoryError> {
        order::ActiveModel::from(aggregate)
            .insert(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        Ok(())
    }

    async fn save<C: ConnectionTrait>(conn: &C, aggregate: &Order) -> Result<(), RepositoryError> {
        order::ActiveModel::from(aggregate)
            .update(conn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound("Order", aggregate.id()),
                other => RepositoryError::QueryError(other.to_string()),
            })?;

        Ok(())
    }

    /// Guarded save: matches only while the stored status is `expected`, so
    /// two assignment passes cannot both claim the same order.
    async fn save_in_status<C: ConnectionTrait>(
        conn: &C,
        aggregate: &Order,
        expected: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let result = order::Entity::update_many()
            .set(order::ActiveModel::from(aggregate))
            .filter(order::Column::Id.eq(aggregate.id()))
            .filter(order::Column::Status.eq(expected.as_str()))
            .exec(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::Conflict("Order", aggregate.id()));
        }

        Ok(())
    }

    async fn fetch<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Order, RepositoryError> {
        let model = order::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?
            .ok_or(RepositoryError::NotFound("Order", id))?;

        Order::try_from(model).map_err(RepositoryError::SerializationError)
    }

    async fn fetch_first_created<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Option<Order>, RepositoryError> {
        let model = order::Entity::find()
            .filter(order::Column::Status.eq(OrderStatus::Created.as_str()))
            .order_by_asc(order::Column::Id)
            .one(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        match model {
            Some(model) => {
                let aggregate =
                    Order::try_from(model).map_err(RepositoryError::SerializationError)?;
                Ok(Some(aggregate))
            }
            None => Ok(None),
        }
    }

    async fn fetch_all_assigned<C: ConnectionTrait>(
        conn: &C,
    ) -> Result<Vec<Order>, RepositoryError> {
        let models = order::Entity::find()
            .filter(order::Column::Status.eq(OrderStatus::Assigned.as_str()))
            .order_by_asc(order::Column::Id)
            .all(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        let mut orders = Vec::with_capacity(models.len());
        for model in models {
            orders.push(Order::try_from(model).map_err(RepositoryError::SerializationError)?);
        }

        Ok(orders)
    }
}

#[async_trait]
impl OrderRepository for OrderPostgresRepository {
    async fn add(&self, aggregate: &Order) -> Result<(), RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::insert(tx, aggregate).await,
            _ => {
                drop(guard);
                let tx = self
                    .uow
                    .db
                    .begin()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;
                Self::insert(&tx, aggregate).await?;
                tx.commit()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))
            }
        }
    }

    async fn update(&self, aggregate: &Order) -> Result<(), RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::save(tx, aggregate).await,
            _ => {
                drop(guard);
                let tx = self
                    .uow
                    .db
                    .begin()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;
                Self::save(&tx, aggregate).await?;
                tx.commit()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))
            }
        }
    }

    async fn update_in_status(
        &self,
        aggregate: &Order,
        expected: OrderStatus,
    ) -> Result<(), RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::save_in_status(tx, aggregate, expected).await,
            _ => {
                drop(guard);
                let tx = self
                    .uow
                    .db
                    .begin()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;
                Self::save_in_status(&tx, aggregate, expected).await?;
                tx.commit()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Order, RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::fetch(tx, id).await,
            _ => Self::fetch(&self.uow.db, id).await,
        }
    }

    async fn get_first_in_created_status(&self) -> Result<Option<Order>, RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::fetch_first_created(tx).await,
            _ => Self::fetch_first_created(&self.uow.db).await,
        }
    }

    async fn get_all_in_assigned_status(&self) -> Result<Vec<Order>, RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::fetch_all_assigned(tx).await,
            _ => Self::fetch_all_assigned(&self.uow.db).await,
        }
    }
}
