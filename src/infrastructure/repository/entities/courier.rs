//! Courier Entity for Sea-ORM
//!
//! Database entity for the couriers table. The aggregate maps to this row
//! plus its storage_places child rows.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::domain::model::courier::{Courier, StoragePlace};
use crate::domain::model::vo::Location;

/// Courier entity for Sea-ORM
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "couriers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub speed: i32,
    pub location_x: i32,
    pub location_y: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::storage_place::Entity")]
    StoragePlace,
}

impl Related<super::storage_place::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StoragePlace.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Courier> for ActiveModel {
    fn from(courier: &Courier) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(courier.id()),
            name: Set(courier.name().to_string()),
            speed: Set(courier.speed()),
            location_x: Set(courier.location().x()),
            location_y: Set(courier.location().y()),
        }
    }
}

impl TryFrom<(Model, Vec<super::storage_place::Model>)> for Courier {
    type Error = String;

    fn try_from(
        (model, places): (Model, Vec<super::storage_place::Model>),
    ) -> Result<Self, Self::Error> {
        let location =
            Location::new(model.location_x, model.location_y).map_err(|e| e.to_string())?;

        let storage_places = places
            .into_iter()
            .map(|p| StoragePlace::restore(p.id, p.name, p.total_volume, p.order_id))
            .collect();

        Ok(Courier::restore(
            model.id,
            model.name,
            model.speed,
            location,
            storage_places,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_round_trip() {
        let mut courier = Courier::new("Bob", 2, Location::new(3, 7).unwrap()).unwrap();
        courier.add_storage_place("Trunk", 20).unwrap();

        let parent = ActiveModel::from(&courier);
        let model = Model {
            id: parent.id.unwrap(),
            name: parent.name.unwrap(),
            speed: parent.speed.unwrap(),
            location_x: parent.location_x.unwrap(),
            location_y: parent.location_y.unwrap(),
        };

        let places: Vec<super::super::storage_place::Model> = courier
            .storage_places()
            .iter()
            .map(|p| super::super::storage_place::Model {
                id: p.id(),
                name: p.name().to_string(),
                total_volume: p.total_volume(),
                order_id: p.order_id(),
                courier_id: courier.id(),
            })
            .collect();

        let restored = Courier::try_from((model, places)).unwrap();

        assert_eq!(restored.id(), courier.id());
        assert_eq!(restored.name(), courier.name());
        assert_eq!(restored.speed(), courier.speed());
        assert_eq!(restored.location(), courier.location());
        assert_eq!(restored.storage_places(), courier.storage_places());
    }

    #[test]
    fn test_off_grid_row_is_rejected() {
        let model = Model {
            id: Uuid::new_v4(),
            name: "Bob".to_string(),
            speed: 2,
            location_x: 0,
            location_y: 5,
        };

        let result = Courier::try_from((model, vec![]));
        assert!(result.is_err());
    }
}
