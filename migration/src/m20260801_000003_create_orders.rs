//! Create Orders Table Migration
//!
//! Creates the `orders` table. The delivery location is embedded as a pair
//! of grid coordinate columns; `courier_id` is set once the order is
//! assigned.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Orders::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Orders::CourierId).uuid())
                    .col(ColumnDef::new(Orders::LocationX).integer().not_null())
                    .col(ColumnDef::new(Orders::LocationY).integer().not_null())
                    .col(ColumnDef::new(Orders::Volume).integer().not_null())
                    .col(ColumnDef::new(Orders::Status).string_len(20).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_orders_status")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await
    }
}

/// Orders table columns
#[derive(Iden)]
pub enum Orders {
    Table,
    Id,
    CourierId,
    LocationX,
    LocationY,
    Volume,
    Status,
}
