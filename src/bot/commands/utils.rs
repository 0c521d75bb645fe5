//! Helpers shared by the Discord commands: argument parsing and formatting.

use crate::{
    core::pricing::Condition,
    errors::{Error, Result},
};
use rust_decimal::Decimal;

/// Condition grades offered as a slash command choice.
#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum ConditionChoice {
    /// Unused
    New,
    /// Light wear
    Good,
    /// Visible wear
    Usable,
    /// Parts only
    Scrap,
}

impl From<ConditionChoice> for Condition {
    fn from(choice: ConditionChoice) -> Self {
        match choice {
            ConditionChoice::New => Self::New,
            ConditionChoice::Good => Self::Good,
            ConditionChoice::Usable => Self::Usable,
            ConditionChoice::Scrap => Self::Scrap,
        }
    }
}

/// Parses a money amount typed by a user, accepting an optional leading `$`.
pub fn parse_money(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    digits.parse::<Decimal>().map_err(|_| Error::Validation {
        message: format!("'{input}' is not a valid amount"),
    })
}

/// Parses an optional money amount.
pub fn parse_optional_money(input: Option<&str>) -> Result<Option<Decimal>> {
    input.map(parse_money).transpose()
}

/// Formats an amount as dollars with two decimals.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Renders a 1-5 rating as stars.
#[must_use]
pub fn format_stars(rating: i32) -> String {
    let filled = usize::try_from(rating.clamp(0, 5)).unwrap_or_default();
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}
