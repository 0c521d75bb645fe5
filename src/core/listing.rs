//! Listing business logic - Puts phones on sales platforms and takes them off.
//!
//! A listing is the pairing of one phone with one platform. Activating it recomputes
//! the platform price and condition label from the phone and platform as they are
//! right now; delisting only clears the `is_listed` flag so the last computed values
//! stay on record. Activation runs inside a database transaction so the lookup,
//! recomputation and write land together.

use crate::{
    core::pricing::{self, PriceQuote},
    entities::{Listing, Phone, Platform, listing, phone, platform},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument, warn};

/// A listing together with its platform, for display.
#[derive(Debug, Clone)]
pub struct ListingDetail {
    /// The listing row
    pub listing: listing::Model,
    /// The platform it is on
    pub platform: platform::Model,
    /// Whether the current phone and platform data make this listing profitable
    pub profitable: bool,
}

/// Lists `phone_id` on `platform_id`, creating the listing on first use.
///
/// The price comes from [`pricing::compute_listing_price`] and the condition from
/// [`pricing::map_condition`]. A platform whose percentage fee is 100 or more
/// lists the phone at its base price; this is logged but not refused.
///
/// # Errors
/// Returns an error if:
/// - The phone or platform does not exist
/// - The phone's price cannot be computed: a non-positive base price or an
///   overflowing result ([`Error::NotListable`])
/// - The database operation fails
#[instrument(skip(db))]
pub async fn activate_listing(
    db: &DatabaseConnection,
    phone_id: i64,
    platform_id: i64,
) -> Result<listing::Model> {
    let txn = db.begin().await?;

    let phone = Phone::find_by_id(phone_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::PhoneNotFound {
            id: phone_id.to_string(),
        })?;
    let platform = Platform::find_by_id(platform_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::PlatformNotFound {
            id: platform_id.to_string(),
        })?;

    let quote =
        pricing::compute_listing_price(phone.base_price, platform.fee_percentage, platform.fixed_fee);
    let platform_price = match quote {
        PriceQuote::Priced(price) => price,
        PriceQuote::Unprofitable(price) => {
            warn!(
                phone_id,
                platform = %platform.name,
                fee_percentage = %platform.fee_percentage,
                "Platform fees leave no margin; listing at base price"
            );
            price
        }
        PriceQuote::NotListable => {
            return Err(Error::NotListable {
                phone_id,
                base_price: phone.base_price,
            });
        }
    };
    let condition = pricing::map_condition(&phone.condition, &platform.name).to_string();
    let now = chrono::Utc::now();

    let existing = Listing::find()
        .filter(listing::Column::PhoneId.eq(phone_id))
        .filter(listing::Column::PlatformId.eq(platform_id))
        .one(&txn)
        .await?;

    let listing = match existing {
        Some(existing) => {
            let mut active: listing::ActiveModel = existing.into();
            active.platform_price = Set(platform_price);
            active.platform_condition_category = Set(condition);
            active.is_listed = Set(true);
            active.updated_at = Set(now);
            active.update(&txn).await?
        }
        None => {
            listing::ActiveModel {
                phone_id: Set(phone_id),
                platform_id: Set(platform_id),
                platform_price: Set(platform_price),
                platform_condition_category: Set(condition),
                is_listed: Set(true),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await?
        }
    };

    txn.commit().await?;

    info!(
        listing_id = listing.id,
        price = %listing.platform_price,
        "Listed {} on {}",
        phone.name,
        platform.name
    );
    Ok(listing)
}

/// Takes a listing off its platform. Price and condition are kept.
///
/// Delisting an already inactive listing is not an error.
#[instrument(skip(db))]
pub async fn delist(db: &DatabaseConnection, listing_id: i64) -> Result<listing::Model> {
    let mut listing: listing::ActiveModel = get_listing_by_id(db, listing_id)
        .await?
        .ok_or(Error::ListingNotFound { id: listing_id })?
        .into();

    listing.is_listed = Set(false);
    listing.updated_at = Set(chrono::Utc::now());
    let listing = listing.update(db).await?;

    info!(listing_id, "Delisted");
    Ok(listing)
}

/// Retrieves a listing by its unique ID.
pub async fn get_listing_by_id(
    db: &DatabaseConnection,
    listing_id: i64,
) -> Result<Option<listing::Model>> {
    Listing::find_by_id(listing_id).one(db).await.map_err(Into::into)
}

/// Retrieves every listing of a phone, active or not, with its platform and
/// current profitability, ordered by platform name.
pub async fn get_listings_for_phone(
    db: &DatabaseConnection,
    phone_id: i64,
) -> Result<Vec<ListingDetail>> {
    let phone = Phone::find_by_id(phone_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::PhoneNotFound {
            id: phone_id.to_string(),
        })?;

    let rows = Listing::find()
        .filter(listing::Column::PhoneId.eq(phone_id))
        .find_also_related(Platform)
        .order_by_asc(platform::Column::Name)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(listing, platform)| {
            platform.map(|platform| ListingDetail {
                profitable: profitable_for(&phone, &platform),
                listing,
                platform,
            })
        })
        .collect())
}

/// Whether a listing would be profitable with the current phone and platform data.
pub async fn listing_is_profitable(db: &DatabaseConnection, listing_id: i64) -> Result<bool> {
    let listing = get_listing_by_id(db, listing_id)
        .await?
        .ok_or(Error::ListingNotFound { id: listing_id })?;

    let phone = Phone::find_by_id(listing.phone_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::PhoneNotFound {
            id: listing.phone_id.to_string(),
        })?;
    let platform = Platform::find_by_id(listing.platform_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::PlatformNotFound {
            id: listing.platform_id.to_string(),
        })?;

    Ok(profitable_for(&phone, &platform))
}

fn profitable_for(phone: &phone::Model, platform: &platform::Model) -> bool {
    pricing::is_profitable(phone.base_price, platform.fee_percentage, platform.fixed_fee)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::phone::{PhoneUpdate, update_phone};
    use crate::core::pricing::UNKNOWN_CONDITION;
    use crate::core::{platform::create_platform, platform::update_platform_fees};
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_activate_listing_computes_price_and_condition() -> Result<()> {
        let (db, phone, platform) = setup_with_listing_pair("100.00", "X", "10.00", "2.00").await?;

        let listing = activate_listing(&db, phone.id, platform.id).await?;

        assert_eq!(listing.phone_id, phone.id);
        assert_eq!(listing.platform_id, platform.id);
        assert_eq!(listing.platform_price, money("113.33"));
        assert_eq!(listing.platform_condition_category, "Good");
        assert!(listing.is_listed);
        assert!(listing_is_profitable(&db, listing.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_activate_listing_with_full_fee_uses_base_price() -> Result<()> {
        let (db, phone, platform) = setup_with_listing_pair("50.00", "Y", "100.00", "5.00").await?;

        let listing = activate_listing(&db, phone.id, platform.id).await?;

        assert_eq!(listing.platform_price, money("50.00"));
        assert_eq!(listing.platform_condition_category, "2 stars (Good)");
        assert!(listing.is_listed);
        assert!(!listing_is_profitable(&db, listing.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_activate_listing_at_largest_accepted_amounts() -> Result<()> {
        let (db, phone, platform) =
            setup_with_listing_pair("99999999.99", "X", "99.99", "99999999.99").await?;

        let listing = activate_listing(&db, phone.id, platform.id).await?;
        assert_eq!(listing.platform_price, money("1999999999800.00"));
        assert!(listing_is_profitable(&db, listing.id).await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_activate_listing_unknown_platform_condition() -> Result<()> {
        let (db, phone, platform) = setup_with_listing_pair("80.00", "W", "5.00", "0").await?;

        let listing = activate_listing(&db, phone.id, platform.id).await?;
        assert_eq!(listing.platform_condition_category, UNKNOWN_CONDITION);

        Ok(())
    }

    #[tokio::test]
    async fn test_relisting_reuses_row_and_recomputes() -> Result<()> {
        let (db, phone, platform) = setup_with_listing_pair("100.00", "Z", "10.00", "2.00").await?;

        let first = activate_listing(&db, phone.id, platform.id).await?;
        let delisted = delist(&db, first.id).await?;
        assert!(!delisted.is_listed);
        assert_eq!(delisted.platform_price, first.platform_price);
        assert_eq!(
            delisted.platform_condition_category,
            first.platform_condition_category
        );

        update_phone(
            &db,
            phone.id,
            PhoneUpdate {
                base_price: Some(money("200.00")),
                ..Default::default()
            },
        )
        .await?;
        update_platform_fees(&db, platform.id, money("20.00"), money("0")).await?;

        let second = activate_listing(&db, phone.id, platform.id).await?;
        assert_eq!(second.id, first.id);
        assert!(second.is_listed);
        assert_eq!(second.platform_price, money("250.00"));
        assert_eq!(second.platform_condition_category, "As New");

        assert_eq!(Listing::find().count(&db).await?, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_one_listing_per_platform() -> Result<()> {
        let (db, phone, x) = setup_with_listing_pair("100.00", "X", "10.00", "2.00").await?;
        let y = create_platform(&db, "Y", money("8"), money("3")).await?;

        activate_listing(&db, phone.id, x.id).await?;
        activate_listing(&db, phone.id, x.id).await?;
        activate_listing(&db, phone.id, y.id).await?;

        let listings = get_listings_for_phone(&db, phone.id).await?;
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].platform.name, "X");
        assert_eq!(listings[1].platform.name, "Y");
        assert!(listings.iter().all(|detail| detail.listing.is_listed));

        Ok(())
    }

    #[tokio::test]
    async fn test_activate_listing_not_found() -> Result<()> {
        let (db, phone, platform) = setup_with_listing_pair("100.00", "X", "10.00", "2.00").await?;

        let result = activate_listing(&db, 999, platform.id).await;
        assert!(matches!(result, Err(Error::PhoneNotFound { .. })));

        let result = activate_listing(&db, phone.id, 999).await;
        assert!(matches!(result, Err(Error::PlatformNotFound { .. })));

        assert_eq!(Listing::find().count(&db).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_delist_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delist(&db, 42).await;
        assert!(matches!(result, Err(Error::ListingNotFound { id: 42 })));

        let result = listing_is_profitable(&db, 42).await;
        assert!(matches!(result, Err(Error::ListingNotFound { id: 42 })));

        Ok(())
    }
}
