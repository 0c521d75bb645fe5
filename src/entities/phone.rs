//! Phone entity - A refurbished phone model held in stock.
//!
//! `condition` holds one of the grades from [`crate::core::pricing::Condition`]
//! and `base_price` is the cost basis used for platform pricing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Phone database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "phones")]
pub struct Model {
    /// Unique identifier for the phone
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Brand this phone belongs to, if any
    pub brand_id: Option<i64>,
    /// Model name (e.g. "12", "Galaxy S21")
    pub name: String,
    /// Cost of the phone before any platform fees
    pub base_price: Decimal,
    /// Condition grade: `"New"`, `"Good"`, `"Usable"` or `"Scrap"`
    pub condition: String,
    /// Units currently in stock
    pub stock: i32,
    /// Storage in GB
    pub memory_gb: i32,
    /// Camera description (e.g. "12MP")
    pub camera_quality: String,
    /// Colour description
    pub color: String,
    /// When the phone was added
    pub created_at: DateTimeUtc,
    /// When the phone was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Phone and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each phone optionally belongs to one brand
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_delete = "SetNull"
    )]
    Brand,
    /// One phone has many listings, one per platform
    #[sea_orm(has_many = "super::listing::Entity")]
    Listings,
    /// One phone has many orders
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
    /// One phone has many reviews
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listings.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
