//! Platform business logic - Handles sales channels and their fee policies.

use crate::{
    config::catalog::PlatformConfig,
    core::pricing,
    entities::{Platform, platform},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

fn validate_fee(fee: Decimal, max: Decimal) -> Result<Decimal> {
    if fee < Decimal::ZERO || fee > max || !pricing::is_whole_cents(fee) {
        return Err(Error::InvalidAmount { amount: fee });
    }
    Ok(fee)
}

/// Registers a new sales platform.
///
/// # Errors
/// Returns an error if:
/// - The name is empty or already taken
/// - Either fee is negative, too large or finer than a cent
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_platform(
    db: &DatabaseConnection,
    name: &str,
    fee_percentage: Decimal,
    fixed_fee: Decimal,
) -> Result<platform::Model> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Platform name cannot be empty".to_string(),
        });
    }
    let fee_percentage = validate_fee(fee_percentage, pricing::max_fee_percentage())?;
    let fixed_fee = validate_fee(fixed_fee, pricing::max_money())?;

    if get_platform_by_name(db, name).await?.is_some() {
        return Err(Error::Validation {
            message: format!("A platform named '{name}' already exists"),
        });
    }

    let platform = platform::ActiveModel {
        name: Set(name.to_string()),
        fee_percentage: Set(fee_percentage),
        fixed_fee: Set(fixed_fee),
        ..Default::default()
    };
    let platform = platform.insert(db).await?;
    info!(platform_id = platform.id, "Registered platform {}", platform.name);
    Ok(platform)
}

/// Retrieves a platform by its unique ID.
pub async fn get_platform_by_id(
    db: &DatabaseConnection,
    platform_id: i64,
) -> Result<Option<platform::Model>> {
    Platform::find_by_id(platform_id).one(db).await.map_err(Into::into)
}

/// Finds a platform by its exact name.
pub async fn get_platform_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<platform::Model>> {
    Platform::find()
        .filter(platform::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists all platforms alphabetically.
pub async fn list_platforms(db: &DatabaseConnection) -> Result<Vec<platform::Model>> {
    Platform::find()
        .order_by_asc(platform::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Changes a platform's fees. Existing listings keep their price until they
/// are activated again.
#[instrument(skip(db))]
pub async fn update_platform_fees(
    db: &DatabaseConnection,
    platform_id: i64,
    fee_percentage: Decimal,
    fixed_fee: Decimal,
) -> Result<platform::Model> {
    let fee_percentage = validate_fee(fee_percentage, pricing::max_fee_percentage())?;
    let fixed_fee = validate_fee(fixed_fee, pricing::max_money())?;

    let mut platform: platform::ActiveModel = get_platform_by_id(db, platform_id)
        .await?
        .ok_or_else(|| Error::PlatformNotFound {
            id: platform_id.to_string(),
        })?
        .into();

    platform.fee_percentage = Set(fee_percentage);
    platform.fixed_fee = Set(fixed_fee);
    platform.update(db).await.map_err(Into::into)
}

/// Inserts the configured platforms that do not exist yet. Returns how many were added.
pub async fn seed_platforms(db: &DatabaseConnection, platforms: &[PlatformConfig]) -> Result<usize> {
    let mut created = 0;
    for config in platforms {
        if get_platform_by_name(db, config.name.trim()).await?.is_none() {
            create_platform(db, &config.name, config.fee_percentage, config.fixed_fee).await?;
            created += 1;
        }
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_platform_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_platform(&db, "", money("10"), money("2")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let result = create_platform(&db, "X", money("-1"), money("2")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = create_platform(&db, "X", money("10"), money("-0.01")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = create_platform(&db, "X", money("1000"), money("2")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = create_platform(&db, "X", money("10"), money("100000000")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = create_platform(&db, "X", money("10.125"), money("2")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        let result = create_platform(&db, "X", money("10"), money("2.001")).await;
        assert!(matches!(result, Err(Error::InvalidAmount { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_and_list_platforms() -> Result<()> {
        let db = setup_test_db().await?;

        let z = create_platform(&db, "Z", money("12"), Decimal::ZERO).await?;
        let x = create_platform(&db, "X", money("10"), money("2")).await?;
        assert_eq!(x.fee_percentage, money("10"));
        assert_eq!(x.fixed_fee, money("2"));

        let result = create_platform(&db, "X", money("5"), money("1")).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        let platforms = list_platforms(&db).await?;
        assert_eq!(platforms, vec![x.clone(), z]);

        let found = get_platform_by_name(&db, "X").await?.unwrap();
        assert_eq!(found.id, x.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_platform_fees() -> Result<()> {
        let db = setup_test_db().await?;
        let x = create_platform(&db, "X", money("10"), money("2")).await?;

        let updated = update_platform_fees(&db, x.id, money("15"), money("3")).await?;
        assert_eq!(updated.fee_percentage, money("15"));
        assert_eq!(updated.fixed_fee, money("3"));

        let result = update_platform_fees(&db, 999, money("15"), money("3")).await;
        assert!(matches!(result, Err(Error::PlatformNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_seed_platforms() -> Result<()> {
        let db = setup_test_db().await?;
        let config = vec![
            PlatformConfig {
                name: "X".to_string(),
                fee_percentage: money("10"),
                fixed_fee: money("2"),
            },
            PlatformConfig {
                name: "Y".to_string(),
                fee_percentage: money("8"),
                fixed_fee: money("3"),
            },
        ];

        assert_eq!(seed_platforms(&db, &config).await?, 2);
        assert_eq!(seed_platforms(&db, &config).await?, 0);
        assert_eq!(list_platforms(&db).await?.len(), 2);

        Ok(())
    }
}
