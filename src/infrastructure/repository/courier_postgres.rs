//! PostgreSQL Implementation of CourierRepository
//!
//! Uses Sea-ORM. Queries run on the unit of work's transaction when one is
//! open and on the shared connection otherwise; writes issued outside a
//! transaction commit in one of their own (full-graph save either way).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::sea_query::Query;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

use crate::domain::model::courier::Courier;
use crate::domain::ports::{CourierRepository, RepositoryError};

use super::entities::{courier, storage_place};
use super::unit_of_work::{TxState, UowInner};

/// PostgreSQL implementation of CourierRepository bound to one unit of work
pub struct CourierPostgresRepository {
    uow: Arc<UowInner>,
}

impl CourierPostgresRepository {
    pub(crate) fn new(uow: Arc<UowInner>) -> Self {
        Self { uow }
    }

    async fn insert_graph<C: ConnectionTrait>(
        conn: &C,
        aggregate: &Courier,
    ) -> Result<(), RepositoryError> {
        courier::ActiveModel::from(aggregate)
            .insert(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        for place in aggregate.storage_places() {
            storage_place::active_model(aggregate.id(), place)
                .insert(conn)
                .await
                .map_err(|e| RepositoryError::QueryError(e.to_string()))?;
        }

        Ok(())
    }

    /// Full-graph save: the stored storage-place set is replaced by the
    /// aggregate's current one.
    async fn update_graph<C: ConnectionTrait>(
        conn: &C,
        aggregate: &Courier,
    ) -> Result<(), RepositoryError> {
        courier::ActiveModel::from(aggregate)
            .update(conn)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepositoryError::NotFound("Courier", aggregate.id()),
                other => RepositoryError::QueryError(other.to_string()),
            })?;

        storage_place::Entity::delete_many()
            .filter(storage_place::Column::CourierId.eq(aggregate.id()))
            .exec(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        for place in aggregate.storage_places() {
            storage_place::active_model(aggregate.id(), place)
                .insert(conn)
                .await
                .map_err(|e| RepositoryError::QueryError(e.to_string()))?;
        }

        Ok(())
    }

    async fn fetch<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Courier, RepositoryError> {
        let model = courier::Entity::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?
            .ok_or(RepositoryError::NotFound("Courier", id))?;

        let places = storage_place::Entity::find()
            .filter(storage_place::Column::CourierId.eq(id))
            .order_by_asc(storage_place::Column::Id)
            .all(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        Courier::try_from((model, places)).map_err(RepositoryError::SerializationError)
    }

    async fn fetch_all_free<C: ConnectionTrait>(conn: &C) -> Result<Vec<Courier>, RepositoryError> {
        // Free couriers are those with at least one empty slot
        let with_empty_slot = Query::select()
            .column(storage_place::Column::CourierId)
            .from(storage_place::Entity)
            .and_where(storage_place::Column::OrderId.is_null())
            .to_owned();

        let models = courier::Entity::find()
            .filter(courier::Column::Id.in_subquery(with_empty_slot))
            .order_by_asc(courier::Column::Id)
            .all(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let places = storage_place::Entity::find()
            .filter(storage_place::Column::CourierId.is_in(ids))
            .order_by_asc(storage_place::Column::Id)
            .all(conn)
            .await
            .map_err(|e| RepositoryError::QueryError(e.to_string()))?;

        let mut by_courier: HashMap<Uuid, Vec<storage_place::Model>> = HashMap::new();
        for place in places {
            by_courier.entry(place.courier_id).or_default().push(place);
        }

        let mut couriers = Vec::with_capacity(models.len());
        for model in models {
            let places = by_courier.remove(&model.id).unwrap_or_default();
            let aggregate = Courier::try_from((model, places))
                .map_err(RepositoryError::SerializationError)?;
            couriers.push(aggregate);
        }

        Ok(couriers)
    }
}

#[async_trait]
impl CourierRepository for CourierPostgresRepository {
    async fn add(&self, aggregate: &Courier) -> Result<(), RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::insert_graph(tx, aggregate).await,
            _ => {
                drop(guard);
                let tx = self
                    .uow
                    .db
                    .begin()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;
                Self::insert_graph(&tx, aggregate).await?;
                tx.commit()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))
            }
        }
    }

    async fn update(&self, aggregate: &Courier) -> Result<(), RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::update_graph(tx, aggregate).await,
            _ => {
                drop(guard);
                let tx = self
                    .uow
                    .db
                    .begin()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))?;
                Self::update_graph(&tx, aggregate).await?;
                tx.commit()
                    .await
                    .map_err(|e| RepositoryError::TransactionError(e.to_string()))
            }
        }
    }

    async fn get(&self, id: Uuid) -> Result<Courier, RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::fetch(tx, id).await,
            _ => Self::fetch(&self.uow.db, id).await,
        }
    }

    async fn get_all_free(&self) -> Result<Vec<Courier>, RepositoryError> {
        let guard = self.uow.tx.lock().await;

        match &*guard {
            TxState::Open(tx) => Self::fetch_all_free(tx).await,
            _ => Self::fetch_all_free(&self.uow.db).await,
        }
    }
}
