//! Storage Place Entity for Sea-ORM
//!
//! Child table of couriers, removed with its parent via cascade delete.

use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::domain::model::courier::StoragePlace;

/// Storage place entity for Sea-ORM
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "storage_places")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub total_volume: i32,
    pub order_id: Option<Uuid>,
    pub courier_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courier::Entity",
        from = "Column::CourierId",
        to = "super::courier::Column::Id",
        on_delete = "Cascade"
    )]
    Courier,
}

impl Related<super::courier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courier.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Build the row for one slot of a courier.
pub fn active_model(courier_id: Uuid, place: &StoragePlace) -> ActiveModel {
    ActiveModel {
        id: Set(place.id()),
        name: Set(place.name().to_string()),
        total_volume: Set(place.total_volume()),
        order_id: Set(place.order_id()),
        courier_id: Set(courier_id),
    }
}
