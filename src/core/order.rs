//! Order business logic - Buying phones from stock and taking phones in.
//!
//! Each order moves exactly one unit. A buy takes a unit out of stock and a sell
//! puts one back; both are recorded as completed orders at the phone's base price.
//! The stock change is a single atomic `UPDATE` so two concurrent buys can never
//! take the last unit twice.

use crate::{
    entities::{Order, Phone, order, phone},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*, sea_query::Expr};
use std::fmt;
use std::str::FromStr;
use tracing::{info, instrument};

/// Direction of an order, seen from the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderType {
    /// Customer buys a phone from stock
    Buy,
    /// Customer sells a phone to the shop
    Sell,
}

impl OrderType {
    /// The code stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(Self::Buy),
            "SELL" => Ok(Self::Sell),
            other => Err(Error::Validation {
                message: format!("Unknown order type '{other}'"),
            }),
        }
    }
}

/// Lifecycle state of an order.
///
/// Orders placed through [`place_order`] settle at once and are always
/// `Completed`; the other variants mirror the remaining codes the `status`
/// column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Created but not settled
    Pending,
    /// Settled
    Completed,
    /// Abandoned
    Cancelled,
}

impl OrderStatus {
    /// The code stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Places a one-unit order for a phone and adjusts its stock.
///
/// # Errors
/// Returns an error if:
/// - The phone does not exist
/// - A buy order is placed while the phone has no stock ([`Error::OutOfStock`])
/// - The database operation fails
#[instrument(skip(db))]
pub async fn place_order(
    db: &DatabaseConnection,
    phone_id: i64,
    order_type: OrderType,
) -> Result<order::Model> {
    let txn = db.begin().await?;

    let phone = Phone::find_by_id(phone_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::PhoneNotFound {
            id: phone_id.to_string(),
        })?;

    let stock_change = Phone::update_many().filter(phone::Column::Id.eq(phone_id));
    let updated = match order_type {
        OrderType::Buy => {
            stock_change
                .col_expr(phone::Column::Stock, Expr::col(phone::Column::Stock).sub(1))
                .filter(phone::Column::Stock.gt(0))
                .exec(&txn)
                .await?
        }
        OrderType::Sell => {
            stock_change
                .col_expr(phone::Column::Stock, Expr::col(phone::Column::Stock).add(1))
                .exec(&txn)
                .await?
        }
    };
    if updated.rows_affected == 0 {
        return Err(Error::OutOfStock { phone: phone.name });
    }

    let order = order::ActiveModel {
        phone_id: Set(phone_id),
        order_type: Set(order_type.as_str().to_string()),
        quantity: Set(1),
        total_price: Set(phone.base_price),
        status: Set(OrderStatus::Completed.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(order_id = order.id, "{} order completed for {}", order_type, phone.name);
    Ok(order)
}

/// Retrieves all orders for a phone, newest first.
pub async fn get_orders_for_phone(
    db: &DatabaseConnection,
    phone_id: i64,
) -> Result<Vec<order::Model>> {
    Order::find()
        .filter(order::Column::PhoneId.eq(phone_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}
