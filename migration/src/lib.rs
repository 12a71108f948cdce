//! Delivery Service Database Migrations
//!
//! Sea-ORM migrations for the couriers, storage_places and orders tables.

pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_couriers;
mod m20260801_000002_create_storage_places;
mod m20260801_000003_create_orders;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_couriers::Migration),
            Box::new(m20260801_000002_create_storage_places::Migration),
            Box::new(m20260801_000003_create_orders::Migration),
        ]
    }
}
