//! Listing entity - A phone offered on one platform.
//!
//! There is at most one row per `(phone_id, platform_id)` pair. Delisting only
//! clears `is_listed`, so the row keeps the last computed price and condition.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Listing database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    /// Unique identifier for the listing
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The listed phone
    pub phone_id: i64,
    /// The platform it is listed on
    pub platform_id: i64,
    /// Selling price computed for this platform
    pub platform_price: Decimal,
    /// Condition label in the platform's own taxonomy
    pub platform_condition_category: String,
    /// Whether the phone is currently listed
    pub is_listed: bool,
    /// When the listing was last activated or delisted
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Listing and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each listing belongs to one phone
    #[sea_orm(
        belongs_to = "super::phone::Entity",
        from = "Column::PhoneId",
        to = "super::phone::Column::Id",
        on_delete = "Cascade"
    )]
    Phone,
    /// Each listing belongs to one platform
    #[sea_orm(
        belongs_to = "super::platform::Entity",
        from = "Column::PlatformId",
        to = "super::platform::Column::Id",
        on_delete = "Cascade"
    )]
    Platform,
}

impl Related<super::phone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phone.def()
    }
}

impl Related<super::platform::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Platform.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
