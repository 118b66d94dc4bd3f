//! # Seller Repository
//!
//! "Become a Seller" onboarding.
//!
//! ```text
//!   BEGIN
//!     user exists?            no  → NotFound
//!     seller row exists?      yes → AlreadySeller
//!     INSERT sellers
//!     UPDATE users SET role = 'Seller'
//!   COMMIT
//! ```
//!
//! Both writes share one transaction, so a user is never promoted without a
//! seller row (or left as a buyer with one).

use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult, DbError, DbResult};
use market_core::onboarding::prepare_seller;
use market_core::submission::SellerApplication;
use market_core::{CoreError, Seller, SellerActor, UserRole};

const SELLER_COLUMNS: &str = "id, user_id, business_name, phone_number, stripe_account_id, \
                              is_verified, agreed_to_terms, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct SellerRepository {
    pool: SqlitePool,
}

impl SellerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SellerRepository { pool }
    }

    /// Validates the application, creates the seller row and promotes the
    /// user to [`UserRole::Seller`] atomically.
    pub async fn create_seller_account(
        &self,
        user_id: &str,
        application: &SellerApplication,
    ) -> CatalogResult<Seller> {
        let draft = prepare_seller(user_id, application)?;

        let mut tx = self.pool.begin().await?;

        let exists: Option<String> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?1")
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(DbError::not_found("User", user_id).into());
        }

        let existing: Option<String> =
            sqlx::query_scalar("SELECT id FROM sellers WHERE user_id = ?1")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;
        if existing.is_some() {
            return Err(CoreError::AlreadySeller(user_id.to_string()).into());
        }

        let seller = sqlx::query_as::<_, Seller>(&format!(
            r#"
            INSERT INTO sellers (id, user_id, business_name, phone_number, stripe_account_id, agreed_to_terms)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {SELLER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&draft.user_id)
        .bind(&draft.business_name)
        .bind(&draft.phone_number)
        .bind(&draft.stripe_account_id)
        .bind(draft.agreed_to_terms)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET role = ?1 WHERE id = ?2")
            .bind(UserRole::Seller)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(user_id = %user_id, seller_id = %seller.id, "Seller account created");
        Ok(seller)
    }

    pub async fn get_by_user(&self, user_id: &str) -> DbResult<Option<Seller>> {
        let seller = sqlx::query_as::<_, Seller>(&format!(
            "SELECT {SELLER_COLUMNS} FROM sellers WHERE user_id = ?1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(seller)
    }

    /// Builds the acting seller for a signed-in user.
    pub async fn actor_for(&self, user_id: &str) -> CatalogResult<SellerActor> {
        let seller = self
            .get_by_user(user_id)
            .await?
            .ok_or_else(|| CatalogError::Core(CoreError::NotASeller(user_id.to_string())))?;

        Ok(SellerActor {
            user_id: user_id.to_string(),
            seller_id: seller.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{CatalogError, DbError};
    use crate::repository::fixtures;
    use market_core::{CoreError, RecordSet, UserRole};

    #[tokio::test]
    async fn test_create_seller_promotes_user() {
        let db = fixtures::database().await;
        let user = db.users().create(None, Some("ada@example.com")).await.unwrap();

        let seller = db
            .sellers()
            .create_seller_account(&user.id, &fixtures::seller_application("9876543210"))
            .await
            .unwrap();

        assert_eq!(seller.user_id, user.id);
        assert!(seller.agreed_to_terms);
        assert!(!seller.is_verified);
        assert_eq!(db.users().role_of(&user.id).await.unwrap(), UserRole::Seller);

        let actor = db.sellers().actor_for(&user.id).await.unwrap();
        assert_eq!(actor.seller_id, seller.id);
    }

    #[tokio::test]
    async fn test_second_application_is_rejected() {
        let db = fixtures::database().await;
        let user = db.users().create(None, None).await.unwrap();
        let app = fixtures::seller_application("9876543210");

        db.sellers().create_seller_account(&user.id, &app).await.unwrap();
        let err = db.sellers().create_seller_account(&user.id, &app).await.unwrap_err();

        assert!(matches!(err, CatalogError::Core(CoreError::AlreadySeller(_))));
    }

    #[tokio::test]
    async fn test_invalid_application_leaves_user_a_buyer() {
        let db = fixtures::database().await;
        let user = db.users().create(None, None).await.unwrap();

        let err = db
            .sellers()
            .create_seller_account(&user.id, &fixtures::seller_application("12345"))
            .await
            .unwrap_err();

        match err {
            CatalogError::Core(CoreError::InvalidSubmission(e)) => {
                assert_eq!(e.failed_sets(), vec![RecordSet::Seller])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(db.users().role_of(&user.id).await.unwrap(), UserRole::Buyer);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let db = fixtures::database().await;
        let err = db
            .sellers()
            .create_seller_account("ghost", &fixtures::seller_application("9876543210"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Db(DbError::NotFound { .. })));

        let err = db.sellers().actor_for("ghost").await.unwrap_err();
        assert!(matches!(err, CatalogError::Core(CoreError::NotASeller(_))));
    }
}
