//! Order Entity for Sea-ORM
//!
//! Database entity for the orders table.

use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::domain::model::order::{Order, OrderStatus};
use crate::domain::model::vo::Location;

/// Order entity for Sea-ORM
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub courier_id: Option<Uuid>,
    pub location_x: i32,
    pub location_y: i32,
    pub volume: i32,
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Order> for ActiveModel {
    fn from(order: &Order) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(order.id()),
            courier_id: Set(order.courier_id()),
            location_x: Set(order.location().x()),
            location_y: Set(order.location().y()),
            volume: Set(order.volume()),
            status: Set(order.status().as_str().to_string()),
        }
    }
}

impl TryFrom<Model> for Order {
    type Error = String;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let location =
            Location::new(model.location_x, model.location_y).map_err(|e| e.to_string())?;

        let status = parse_status(&model.status)?;

        Ok(Order::restore(
            model.id,
            model.courier_id,
            location,
            model.volume,
            status,
        ))
    }
}

fn parse_status(s: &str) -> Result<OrderStatus, String> {
    match s {
        "created" => Ok(OrderStatus::Created),
        "assigned" => Ok(OrderStatus::Assigned),
        "completed" => Ok(OrderStatus::Completed),
        other => Err(format!("unknown order status: {}", other)),
    }
}
