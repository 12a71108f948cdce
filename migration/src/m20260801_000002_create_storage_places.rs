//! Create Storage Places Table Migration
//!
//! Creates the `storage_places` child table. Rows are owned by their courier
//! and dropped with it (ON DELETE CASCADE).

use sea_orm_migration::prelude::*;

use crate::m20260801_000001_create_couriers::Couriers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StoragePlaces::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoragePlaces::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StoragePlaces::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoragePlaces::TotalVolume)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StoragePlaces::OrderId).uuid())
                    .col(ColumnDef::new(StoragePlaces::CourierId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_storage_places_courier")
                            .from(StoragePlaces::Table, StoragePlaces::CourierId)
                            .to(Couriers::Table, Couriers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_storage_places_courier_id")
                    .table(StoragePlaces::Table)
                    .col(StoragePlaces::CourierId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StoragePlaces::Table).to_owned())
            .await
    }
}

/// Storage places table columns
#[derive(Iden)]
pub enum StoragePlaces {
    Table,
    Id,
    Name,
    TotalVolume,
    OrderId,
    CourierId,
}
