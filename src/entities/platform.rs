//! Platform entity - An e-commerce channel and its fee policy.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Platform database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "platforms")]
pub struct Model {
    /// Unique identifier for the platform
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Platform name (e.g. "X", "Y", "Z"), unique
    #[sea_orm(unique)]
    pub name: String,
    /// Percentage of the selling price kept by the platform (10.00 means 10%)
    pub fee_percentage: Decimal,
    /// Flat fee per sale
    pub fixed_fee: Decimal,
}

/// Defines relationships between Platform and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One platform has many listings
    #[sea_orm(has_many = "super::listing::Entity")]
    Listings,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
