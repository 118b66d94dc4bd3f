//! # Store Repository
//!
//! Store registration and the seller dashboard's store list.

use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CatalogResult, DbResult};
use market_core::onboarding::prepare_store;
use market_core::submission::StoreApplication;
use market_core::{SellerActor, Store, StoreSummary};

const STORE_COLUMNS: &str = "id, seller_id, store_name, store_description, slug, logo_image, \
                             cover_image, is_active, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Validates the application and opens a store for the acting seller.
    ///
    /// The slug gets a random suffix; a suffix collision surfaces as
    /// `DbError::UniqueViolation` and can simply be retried.
    pub async fn create_store(
        &self,
        actor: &SellerActor,
        application: &StoreApplication,
    ) -> CatalogResult<Store> {
        let draft = prepare_store(actor, application)?;

        let store = sqlx::query_as::<_, Store>(&format!(
            r#"
            INSERT INTO stores (id, seller_id, store_name, store_description, slug,
                                logo_image, cover_image, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            RETURNING {STORE_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4().to_string())
        .bind(&draft.seller_id)
        .bind(&draft.store_name)
        .bind(&draft.store_description)
        .bind(&draft.slug)
        .bind(&draft.logo_image)
        .bind(&draft.cover_image)
        .bind(draft.is_active)
        .fetch_one(&self.pool)
        .await?;

        info!(store_id = %store.id, slug = %store.slug, "Store created");
        Ok(store)
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(&format!(
            "SELECT {STORE_COLUMNS} FROM stores WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Stores of one seller, newest first.
    pub async fn list_for_seller(&self, seller_id: &str) -> DbResult<Vec<StoreSummary>> {
        let stores = sqlx::query_as::<_, StoreSummary>(
            r#"
            SELECT store_name, is_active, id AS store_id
            FROM stores
            WHERE seller_id = ?1
            ORDER BY created_at DESC, store_name
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(seller_id = %seller_id, count = stores.len(), "Listed stores");
        Ok(stores)
    }

    /// Activates or deactivates a store. Returns false if it does not exist.
    pub async fn set_active(&self, store_id: &str, active: bool) -> DbResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE stores
            SET is_active = ?1, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE id = ?2
            "#,
        )
        .bind(active)
        .bind(store_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CatalogError;
    use crate::repository::fixtures;
    use market_core::slug::is_valid_slug;
    use market_core::{CoreError, RecordSet};

    #[tokio::test]
    async fn test_create_and_list_stores() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        assert!(store.slug.starts_with("acme-outlet-"));
        assert!(is_valid_slug(&store.slug));
        assert_eq!(store.cover_image, None);
        assert!(uuid::Uuid::parse_str(&store.id).is_ok());

        db.stores()
            .create_store(&actor, &fixtures::store_application("Acme Kids", false))
            .await
            .unwrap();

        let list = db.stores().list_for_seller(&actor.seller_id).await.unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().any(|s| s.store_id == store.id && s.is_active));
        assert!(list.iter().any(|s| s.store_name == "Acme Kids" && !s.is_active));

        assert!(db.stores().list_for_seller("other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_same_name_gets_distinct_slugs() {
        let db = fixtures::database().await;
        let (actor, first) = fixtures::seller_with_store(&db, "ada@example.com", true).await;
        let second = db
            .stores()
            .create_store(&actor, &fixtures::store_application("Acme Outlet", true))
            .await
            .unwrap();

        assert_ne!(first.slug, second.slug);
    }

    #[tokio::test]
    async fn test_invalid_store_application() {
        let db = fixtures::database().await;
        let (actor, _) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let err = db
            .stores()
            .create_store(&actor, &fixtures::store_application("AB", true))
            .await
            .unwrap_err();

        match err {
            CatalogError::Core(CoreError::InvalidSubmission(e)) => {
                assert!(e.has_failed(RecordSet::Store))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_toggle_active() {
        let db = fixtures::database().await;
        let (_, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        assert!(db.stores().set_active(&store.id, false).await.unwrap());
        let reloaded = db.stores().get_by_id(&store.id).await.unwrap().unwrap();
        assert!(!reloaded.is_active);

        assert!(!db.stores().set_active("missing", true).await.unwrap());
    }
}
