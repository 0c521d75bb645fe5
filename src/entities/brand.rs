//! Brand entity - A phone manufacturer (e.g. "Apple", "Samsung").

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Brand database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    /// Unique identifier for the brand
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name, unique across brands
    #[sea_orm(unique)]
    pub name: String,
}

/// Defines relationships between Brand and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One brand has many phones
    #[sea_orm(has_many = "super::phone::Entity")]
    Phones,
}

impl Related<super::phone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phones.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
