//! Customer query entity - Messages left through the contact form.
//!
//! Sell-a-phone submissions are stored here too, with the phone details folded
//! into `message`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer query database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "queries")]
pub struct Model {
    /// Unique identifier for the query
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the sender
    pub name: String,
    /// Reply address
    pub email: String,
    /// Message body
    pub message: String,
    /// When the query was received
    pub created_at: DateTimeUtc,
}

/// `CustomerQuery` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
