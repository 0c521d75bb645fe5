//! Cart business logic - Per-user shopping carts.
//!
//! Every user has at most one cart, created the first time it is needed. Adding a
//! phone that is already in the cart bumps its quantity instead of adding a row.

use crate::{
    entities::{Cart, CartItem, Phone, cart, cart_item, phone},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// One line of a cart, with its phone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// The cart item row
    pub item: cart_item::Model,
    /// The phone it refers to
    pub phone: phone::Model,
}

impl CartLine {
    /// Base price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.phone.base_price * Decimal::from(self.item.quantity)
    }
}

/// A user's cart with its lines and total.
#[derive(Debug, Clone)]
pub struct CartSummary {
    /// The cart
    pub cart: cart::Model,
    /// Lines in insertion order
    pub lines: Vec<CartLine>,
    /// Sum of all line subtotals
    pub total: Decimal,
}

/// Returns the user's cart, creating an empty one if they have none.
pub async fn get_or_create_cart(db: &DatabaseConnection, user_id: &str) -> Result<cart::Model> {
    if let Some(cart) = Cart::find()
        .filter(cart::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(cart);
    }

    cart::ActiveModel {
        user_id: Set(user_id.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Puts one unit of a phone in the user's cart.
#[instrument(skip(db))]
pub async fn add_to_cart(
    db: &DatabaseConnection,
    user_id: &str,
    phone_id: i64,
) -> Result<cart_item::Model> {
    crate::core::phone::require_phone(db, phone_id).await?;
    let cart = get_or_create_cart(db, user_id).await?;

    let existing = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .filter(cart_item::Column::PhoneId.eq(phone_id))
        .one(db)
        .await?;

    let item = match existing {
        Some(item) => {
            let quantity = item.quantity + 1;
            let mut item: cart_item::ActiveModel = item.into();
            item.quantity = Set(quantity);
            item.update(db).await?
        }
        None => {
            cart_item::ActiveModel {
                cart_id: Set(cart.id),
                phone_id: Set(phone_id),
                quantity: Set(1),
                ..Default::default()
            }
            .insert(db)
            .await?
        }
    };

    info!(cart_id = cart.id, phone_id, quantity = item.quantity, "Cart updated");
    Ok(item)
}

/// Loads the user's cart with every line and the total price.
pub async fn view_cart(db: &DatabaseConnection, user_id: &str) -> Result<CartSummary> {
    let cart = get_or_create_cart(db, user_id).await?;

    let rows = CartItem::find()
        .filter(cart_item::Column::CartId.eq(cart.id))
        .find_also_related(Phone)
        .order_by_asc(cart_item::Column::Id)
        .all(db)
        .await?;

    let lines: Vec<CartLine> = rows
        .into_iter()
        .filter_map(|(item, phone)| phone.map(|phone| CartLine { item, phone }))
        .collect();
    let total = lines.iter().map(CartLine::subtotal).sum();

    Ok(CartSummary { cart, lines, total })
}

/// Removes a line from the user's own cart.
///
/// Items in other users' carts are reported as not found.
#[instrument(skip(db))]
pub async fn remove_from_cart(
    db: &DatabaseConnection,
    user_id: &str,
    item_id: i64,
) -> Result<cart_item::Model> {
    let item = CartItem::find_by_id(item_id)
        .find_also_related(Cart)
        .one(db)
        .await?;

    let item = match item {
        Some((item, Some(cart))) if cart.user_id == user_id => item,
        _ => return Err(Error::CartItemNotFound { id: item_id }),
    };

    CartItem::delete_by_id(item_id).exec(db).await?;
    Ok(item)
}
