//! Review business logic - Customer ratings and comments on phones.

use crate::{
    entities::{Review, review},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::ops::RangeInclusive;
use tracing::{info, instrument};

/// Accepted star ratings.
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

/// Records a review of a phone by a user.
///
/// # Errors
/// Returns an error if:
/// - The rating is outside 1-5 or the comment is empty
/// - The phone does not exist
/// - The database insert operation fails
#[instrument(skip(db, comment))]
pub async fn add_review(
    db: &DatabaseConnection,
    phone_id: i64,
    user_id: &str,
    rating: i32,
    comment: &str,
) -> Result<review::Model> {
    if !RATING_RANGE.contains(&rating) {
        return Err(Error::Validation {
            message: format!("Rating must be between 1 and 5 (got {rating})"),
        });
    }
    let comment = comment.trim();
    if comment.is_empty() {
        return Err(Error::Validation {
            message: "Review comment cannot be empty".to_string(),
        });
    }

    crate::core::phone::require_phone(db, phone_id).await?;

    let review = review::ActiveModel {
        phone_id: Set(phone_id),
        user_id: Set(user_id.to_string()),
        rating: Set(rating),
        comment: Set(comment.to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(review_id = review.id, phone_id, rating, "Review added");
    Ok(review)
}

/// Retrieves all reviews of a phone, newest first.
pub async fn get_reviews_for_phone(
    db: &DatabaseConnection,
    phone_id: i64,
) -> Result<Vec<review::Model>> {
    Review::find()
        .filter(review::Column::PhoneId.eq(phone_id))
        .order_by_desc(review::Column::CreatedAt)
        .order_by_desc(review::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Mean star rating of a phone, or `None` when it has no reviews.
pub async fn average_rating(db: &DatabaseConnection, phone_id: i64) -> Result<Option<f64>> {
    let reviews = get_reviews_for_phone(db, phone_id).await?;
    if reviews.is_empty() {
        return Ok(None);
    }

    let total: i32 = reviews.iter().map(|r| r.rating).sum();
    #[allow(clippy::cast_precision_loss)]
    let average = f64::from(total) / reviews.len() as f64;
    Ok(Some(average))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_add_review_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for rating in [0, 6, -1] {
            let result = add_review(&db, 1, "user", rating, "fine").await;
            assert!(matches!(result, Err(Error::Validation { .. })));
        }

        let result = add_review(&db, 1, "user", 3, "   ").await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_reviews_newest_first_and_average() -> Result<()> {
        let db = setup_test_db().await?;
        let phone = create_test_phone(&db, "iPhone 11", None).await?;

        assert_eq!(average_rating(&db, phone.id).await?, None);

        add_review(&db, phone.id, "alice", 5, "Like new").await?;
        add_review(&db, phone.id, "bob", 2, "Scratched screen").await?;

        let reviews = get_reviews_for_phone(&db, phone.id).await?;
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].user_id, "bob");
        assert_eq!(reviews[1].user_id, "alice");

        assert_eq!(average_rating(&db, phone.id).await?, Some(3.5));

        Ok(())
    }

    #[tokio::test]
    async fn test_review_for_missing_phone() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_review(&db, 404, "alice", 4, "Where is it?").await;
        assert!(matches!(result, Err(Error::PhoneNotFound { .. })));
        Ok(())
    }
}
