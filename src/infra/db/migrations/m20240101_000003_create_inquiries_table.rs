//! Migration: Create inquiries table.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users_table::Users;
use super::m20240101_000002_create_listings_table::Listings;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inquiries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiries::ListingId).integer().not_null())
                    .col(ColumnDef::new(Inquiries::FullName).string().not_null())
                    .col(ColumnDef::new(Inquiries::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Inquiries::Message).text().not_null())
                    .col(ColumnDef::new(Inquiries::UserId).integer().null())
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiries_listing_id")
                            .from(Inquiries::Table, Inquiries::ListingId)
                            .to(Listings::Table, Listings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inquiries_user_id")
                            .from(Inquiries::Table, Inquiries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_listing_id")
                    .table(Inquiries::Table)
                    .col(Inquiries::ListingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Inquiries {
    Table,
    Id,
    ListingId,
    FullName,
    PhoneNumber,
    Message,
    UserId,
    CreatedAt,
}
