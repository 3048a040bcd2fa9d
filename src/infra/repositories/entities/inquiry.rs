//! Inquiry database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Inquiry;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inquiries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub listing_id: i32,
    pub full_name: String,
    pub phone_number: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    /// NULL for anonymous visitors
    pub user_id: Option<i32>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::listing::Entity",
        from = "Column::ListingId",
        to = "super::listing::Column::Id",
        on_delete = "Cascade"
    )]
    Listing,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listing.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Inquiry {
    fn from(model: Model) -> Self {
        Inquiry {
            id: model.id,
            listing_id: model.listing_id,
            full_name: model.full_name,
            phone_number: model.phone_number,
            message: model.message,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}
