//! Customer query business logic - The contact form and sell-a-phone submissions.
//!
//! Both kinds of message end up in the same `queries` table so staff read them
//! in one place.

use crate::{
    entities::{CustomerQuery, customer_query},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{info, instrument};

/// A customer's offer to sell us a phone model we do not stock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SellRequest {
    /// Model name of the phone
    pub phone_name: String,
    /// Brand of the phone
    pub brand: String,
    /// Condition as described by the customer
    pub condition: String,
    /// Anything else the customer wants to add
    pub comments: String,
}

impl SellRequest {
    /// Formats the request as the body of a customer query.
    #[must_use]
    pub fn to_message(&self) -> String {
        format!(
            "New phone submission:\n\n\
             Phone Name: {}\n\
             Brand: {}\n\
             Condition: {}\n\
             Comments: {}",
            self.phone_name, self.brand, self.condition, self.comments
        )
    }
}

fn require_field(value: &str, field: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(value.to_string())
}

fn validate_email(email: &str) -> Result<String> {
    let email = require_field(email, "Email")?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(Error::Validation {
            message: format!("'{email}' is not a valid email address"),
        }),
    }
}

/// Stores a message from the contact form. Name, email and message are all required.
#[instrument(skip(db, message))]
pub async fn submit_query(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    message: &str,
) -> Result<customer_query::Model> {
    let name = require_field(name, "Name")?;
    let email = validate_email(email)?;
    let message = require_field(message, "Message")?;

    let query = customer_query::ActiveModel {
        name: Set(name),
        email: Set(email),
        message: Set(message),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(query_id = query.id, "Customer query received");
    Ok(query)
}

/// Stores a sell-a-phone submission as a customer query.
pub async fn submit_sell_request(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
    request: &SellRequest,
) -> Result<customer_query::Model> {
    require_field(&request.phone_name, "Phone name")?;
    submit_query(db, name, email, &request.to_message()).await
}

/// Lists all customer queries, newest first.
pub async fn list_queries(db: &DatabaseConnection) -> Result<Vec<customer_query::Model>> {
    CustomerQuery::find()
        .order_by_desc(customer_query::Column::CreatedAt)
        .order_by_desc(customer_query::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a customer query once it has been handled.
#[instrument(skip(db))]
pub async fn delete_query(db: &DatabaseConnection, query_id: i64) -> Result<customer_query::Model> {
    let query = CustomerQuery::find_by_id(query_id)
        .one(db)
        .await?
        .ok_or(Error::QueryNotFound { id: query_id })?;

    CustomerQuery::delete_by_id(query_id).exec(db).await?;
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_submit_query_requires_all_fields() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let cases = [
            ("", "a@b.com", "hello"),
            ("Ann", "", "hello"),
            ("Ann", "a@b.com", "  "),
            ("Ann", "not-an-email", "hello"),
            ("Ann", "@b.com", "hello"),
        ];
        for (name, email, message) in cases {
            let result = submit_query(&db, name, email, message).await;
            assert!(
                matches!(result, Err(Error::Validation { .. })),
                "accepted {name:?} {email:?} {message:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_queries_listed_newest_first_and_deleted() -> Result<()> {
        let db = setup_test_db().await?;

        let first = submit_query(&db, "Ann", "ann@example.com", "Battery question").await?;
        let second = submit_query(&db, "Ben", "ben@example.com", "Complaint").await?;
        assert_eq!(first.name, "Ann");

        let queries = list_queries(&db).await?;
        assert_eq!(queries, vec![second.clone(), first.clone()]);

        delete_query(&db, first.id).await?;
        assert_eq!(list_queries(&db).await?, vec![second]);

        let result = delete_query(&db, first.id).await;
        assert!(matches!(result, Err(Error::QueryNotFound { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_sell_request_message() -> Result<()> {
        let db = setup_test_db().await?;
        let request = SellRequest {
            phone_name: "Galaxy S8".to_string(),
            brand: "Samsung".to_string(),
            condition: "Good".to_string(),
            comments: "Box included".to_string(),
        };

        let query = submit_sell_request(&db, "Cal", "cal@example.com", &request).await?;
        assert_eq!(
            query.message,
            "New phone submission:\n\nPhone Name: Galaxy S8\nBrand: Samsung\nCondition: Good\nComments: Box included"
        );

        let result = submit_sell_request(&db, "Cal", "cal@example.com", &SellRequest::default()).await;
        assert!(matches!(result, Err(Error::Validation { .. })));

        Ok(())
    }
}
