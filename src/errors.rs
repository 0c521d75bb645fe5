//! Unified error types for `RefurbBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`], so the core layer,
//! the configuration loaders and the bot commands all share one error enum.

use rust_decimal::Decimal;
use sea_orm::DbErr;
use thiserror::Error;

/// All errors that can occur in the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// User supplied input failed validation
    #[error("Invalid input: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// A money amount was out of range
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },

    /// Brand lookup failed
    #[error("Brand not found: {name}")]
    BrandNotFound {
        /// Brand name or id that was requested
        name: String,
    },

    /// Phone lookup failed
    #[error("Phone not found: {id}")]
    PhoneNotFound {
        /// Phone id or name that was requested
        id: String,
    },

    /// Platform lookup failed
    #[error("Platform not found: {id}")]
    PlatformNotFound {
        /// Platform id or name that was requested
        id: String,
    },

    /// Listing lookup failed
    #[error("Listing not found: {id}")]
    ListingNotFound {
        /// Listing id that was requested
        id: i64,
    },

    /// Customer query lookup failed
    #[error("Query not found: {id}")]
    QueryNotFound {
        /// Query id that was requested
        id: i64,
    },

    /// Cart item lookup failed, or the item belongs to someone else's cart
    #[error("Cart item not found: {id}")]
    CartItemNotFound {
        /// Cart item id that was requested
        id: i64,
    },

    /// A phone's base price cannot produce a listing price
    #[error("Phone {phone_id} has no listable price (base price {base_price})")]
    NotListable {
        /// The phone that was refused
        phone_id: i64,
        /// Its current base price
        base_price: Decimal,
    },

    /// A buy order was placed for a phone with no stock left
    #[error("{phone} is out of stock")]
    OutOfStock {
        /// Name of the phone
        phone: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Environment variable was missing or unreadable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Serenity/Poise framework error
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
