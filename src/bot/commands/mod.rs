//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Phone and brand catalog commands
pub mod catalog;

/// Contact form, sell offers and the staff inbox
pub mod customer;

/// General utility commands
pub mod general;

/// Listing and platform commands
pub mod listing;

/// Orders, carts and reviews
pub mod shop;

/// Argument parsing and formatting shared by the commands
pub mod utils;

use crate::{bot::BotData, errors::Error};

/// Every command the bot registers.
#[must_use]
pub fn all() -> Vec<poise::Command<BotData, Error>> {
    vec![
        general::ping(),
        general::help(),
        catalog::phone(),
        catalog::brand(),
        listing::listing(),
        listing::platform(),
        shop::buy(),
        shop::sell(),
        shop::cart(),
        shop::review(),
        customer::contact(),
        customer::sell_phone(),
        customer::queries(),
    ]
}
