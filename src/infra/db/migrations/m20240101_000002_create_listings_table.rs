//! Migration: Create listings table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::Make).string().not_null())
                    .col(ColumnDef::new(Listings::ModelYear).integer().not_null())
                    .col(
                        ColumnDef::new(Listings::Mileage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Listings::Spec).string().not_null())
                    .col(ColumnDef::new(Listings::Exterior).string().not_null())
                    .col(ColumnDef::new(Listings::Interior).string().not_null())
                    .col(ColumnDef::new(Listings::Price).double().not_null())
                    .col(
                        ColumnDef::new(Listings::Status)
                            .string()
                            .not_null()
                            .default("Available"),
                    )
                    .col(ColumnDef::new(Listings::Notes).text().null())
                    // Any historical images shape fits: array, JSON string or delimited string
                    .col(ColumnDef::new(Listings::Images).json_binary().null())
                    .col(ColumnDef::new(Listings::OwnerId).integer().null())
                    .col(
                        ColumnDef::new(Listings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Listings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_listings_owner_id")
                            .from(Listings::Table, Listings::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_owner_id")
                    .table(Listings::Table)
                    .col(Listings::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Listings {
    Table,
    Id,
    Make,
    ModelYear,
    Mileage,
    Spec,
    Exterior,
    Interior,
    Price,
    Status,
    Notes,
    Images,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
