//! Order entity - A completed buy or sell of a single phone.
//!
//! `order_type` is `"BUY"` or `"SELL"`; `status` is `"PENDING"`, `"COMPLETED"`
//! or `"CANCELLED"`.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The phone being bought or sold
    pub phone_id: i64,
    /// `"BUY"` or `"SELL"`
    pub order_type: String,
    /// Number of units
    pub quantity: i32,
    /// Total price of the order
    pub total_price: Decimal,
    /// Order status
    pub status: String,
    /// When the order was placed
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order is for one phone
    #[sea_orm(
        belongs_to = "super::phone::Entity",
        from = "Column::PhoneId",
        to = "super::phone::Column::Id",
        on_delete = "Cascade"
    )]
    Phone,
}

impl Related<super::phone::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Phone.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
