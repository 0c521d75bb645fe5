//! Listing price and condition rules.
//!
//! Platforms deduct a percentage fee and a fixed fee from every sale. The
//! functions here work out the break-even selling price for a phone on a given
//! platform, translate our condition grades into each platform's taxonomy, and
//! decide whether a listing is profitable. Everything in this module is pure:
//! no database access, no shared state.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Label returned by [`map_condition`] for pairs outside the table.
pub const UNKNOWN_CONDITION: &str = "Unknown";

/// Overall condition grade of a refurbished phone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    /// Unused
    New,
    /// Light wear, fully working
    Good,
    /// Visible wear, working
    Usable,
    /// Parts only
    Scrap,
}

impl Condition {
    /// All grades, best first.
    pub const ALL: [Self; 4] = [Self::New, Self::Good, Self::Usable, Self::Scrap];

    /// The label stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Good => "Good",
            Self::Usable => "Usable",
            Self::Scrap => "Scrap",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the four condition grades.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown condition '{0}'")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "New" => Ok(Self::New),
            "Good" => Ok(Self::Good),
            "Usable" => Ok(Self::Usable),
            "Scrap" => Ok(Self::Scrap),
            other => Err(UnknownCondition(other.to_string())),
        }
    }
}

/// Outcome of pricing a phone for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceQuote {
    /// Break-even price after the platform's fees
    Priced(Decimal),
    /// The percentage fee swallows the whole sale. Carries the unchanged base price.
    Unprofitable(Decimal),
    /// The base price is zero or negative, or the price does not fit in a
    /// `Decimal`; the phone cannot be listed.
    NotListable,
}

impl PriceQuote {
    /// The price to store on the listing. `NotListable` quotes are zero.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        match self {
            Self::Priced(price) | Self::Unprofitable(price) => price,
            Self::NotListable => Decimal::ZERO,
        }
    }

    /// Whether the quote can be used to list the phone at all.
    #[must_use]
    pub const fn is_listable(self) -> bool {
        !matches!(self, Self::NotListable)
    }
}

/// Largest amount a price or fixed fee may hold: ten digits, two of them cents.
#[must_use]
pub fn max_money() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

/// Largest percentage fee a platform may charge: five digits, two of them decimals.
#[must_use]
pub fn max_fee_percentage() -> Decimal {
    Decimal::new(99_999, 2)
}

/// Whether `amount` has no more than two significant decimal places.
#[must_use]
pub fn is_whole_cents(amount: Decimal) -> bool {
    amount.normalize().scale() <= 2
}

/// Rounds a money amount to cents, half-up.
#[must_use]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the selling price `S` at which, after the platform takes
/// `fee_percentage` percent of `S` and then `fixed_fee`, the seller is left with
/// `base_price`:
///
/// `S = (base_price + fixed_fee) / (1 - fee_percentage / 100)`
///
/// A percentage fee of 100 or more makes the denominator non-positive; no
/// division happens and the quote is [`PriceQuote::Unprofitable`] at the base
/// price. A result too large for a `Decimal` is [`PriceQuote::NotListable`].
#[must_use]
pub fn compute_listing_price(
    base_price: Decimal,
    fee_percentage: Decimal,
    fixed_fee: Decimal,
) -> PriceQuote {
    if base_price <= Decimal::ZERO {
        return PriceQuote::NotListable;
    }

    let fee_fraction = fee_percentage / Decimal::ONE_HUNDRED;
    if fee_fraction >= Decimal::ONE {
        return PriceQuote::Unprofitable(base_price);
    }

    let selling_price = base_price
        .checked_add(fixed_fee)
        .zip(Decimal::ONE.checked_sub(fee_fraction))
        .and_then(|(cost, keep)| cost.checked_div(keep));
    selling_price.map_or(PriceQuote::NotListable, |price| {
        PriceQuote::Priced(round_money(price))
    })
}

/// Translates a general condition grade into the label used by `platform_name`.
///
/// Unknown platforms and unknown grades map to [`UNKNOWN_CONDITION`].
#[must_use]
pub fn map_condition(general_condition: &str, platform_name: &str) -> &'static str {
    let Ok(condition) = general_condition.parse::<Condition>() else {
        return UNKNOWN_CONDITION;
    };

    match (platform_name, condition) {
        ("X", Condition::New) | ("Z", Condition::New) => "New",
        ("X", Condition::Good) => "Good",
        ("X", Condition::Usable | Condition::Scrap) => "Scrap",
        ("Y", Condition::New) => "3 stars (Excellent)",
        ("Y", Condition::Good) => "2 stars (Good)",
        ("Y", Condition::Usable | Condition::Scrap) => "1 star (Usable)",
        ("Z", Condition::Good) => "As New",
        ("Z", Condition::Usable | Condition::Scrap) => "Good",
        _ => UNKNOWN_CONDITION,
    }
}

/// A listing is profitable when its computed price is strictly above the base
/// price. Zero-margin listings are not profitable.
#[must_use]
pub fn is_profitable(base_price: Decimal, fee_percentage: Decimal, fixed_fee: Decimal) -> bool {
    compute_listing_price(base_price, fee_percentage, fixed_fee).amount() > base_price
}
