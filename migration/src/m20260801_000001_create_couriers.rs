//! Create Couriers Table Migration
//!
//! Creates the `couriers` table. The courier location is embedded as a pair
//! of grid coordinate columns.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Couriers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Couriers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Couriers::Name).string_len(255).not_null())
                    .col(ColumnDef::new(Couriers::Speed).integer().not_null())
                    .col(ColumnDef::new(Couriers::LocationX).integer().not_null())
                    .col(ColumnDef::new(Couriers::LocationY).integer().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Couriers::Table).to_owned())
            .await
    }
}

/// Couriers table columns
#[derive(Iden)]
pub enum Couriers {
    Table,
    Id,
    Name,
    Speed,
    LocationX,
    LocationY,
}
