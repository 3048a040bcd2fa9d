//! Listing database entity for SeaORM.
//!
//! `images` is a JSONB column so that every historical shape of the field
//! (array, JSON-encoded string, delimited string) fits the same table.

use sea_orm::entity::prelude::*;

use crate::domain::{images, Listing};
use crate::errors::AppError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub make: String,
    pub model_year: i32,
    pub mileage: i32,
    pub spec: String,
    pub exterior: String,
    pub interior: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub images: Option<Json>,
    pub owner_id: Option<i32>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Owner,
    #[sea_orm(has_many = "super::inquiry::Entity")]
    Inquiry,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::inquiry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert a row into the domain entity, normalizing `images`.
///
/// Fails only when `spec` or `status` hold values the API never writes.
impl TryFrom<Model> for Listing {
    type Error = AppError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let corrupt = |e: String| AppError::internal(format!("listing {}: {}", model.id, e));
        let spec = model.spec.parse().map_err(corrupt)?;
        let status = model.status.parse().map_err(corrupt)?;

        Ok(Listing {
            id: model.id,
            images: images::normalize_stored(model.images.as_ref()),
            make: model.make,
            model_year: model.model_year,
            mileage: model.mileage,
            spec,
            exterior: model.exterior,
            interior: model.interior,
            price: model.price,
            status,
            notes: model.notes,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
