//! # Product Repository
//!
//! Product creation and catalog read-back.
//!
//! ## create_product
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ProductSubmission                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  prepare_bundle (phase 1, no I/O) ──── invalid ──► CatalogError::Core  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  timeout(transaction_timeout) {                                        │
//! │      pool.begin()                                                      │
//! │      write_bundle(tx, actor, bundle)                                   │
//! │         └── Err ──► ROLLBACK ──► CatalogError                          │
//! │  }  elapsed ──► transaction dropped (rolled back) ──► Timeout          │
//! │       │ Ok                                                              │
//! │       ▼                                                                 │
//! │  COMMIT (not bounded by the timeout) ──► CreatedProduct                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::{Duration, Instant};

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, error, info, warn};

use crate::error::{CatalogError, CatalogResult, DbResult};
use crate::writer::{write_bundle, CreatedProduct};
use market_core::catalog::{prepare_bundle, ValidatedBundle};
use market_core::submission::ProductSubmission;
use market_core::{Category, Product, ProductVariant, SellerActor, Tag};

/// Row counts per catalog table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CatalogCounts {
    pub products: i64,
    pub variants: i64,
    pub categories: i64,
    pub tags: i64,
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let created = db.products().create_product(&actor, &submission).await?;
/// let variants = db.products().variants_for(&created.product_id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
    transaction_timeout: Duration,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool, transaction_timeout: Duration) -> Self {
        ProductRepository {
            pool,
            transaction_timeout,
        }
    }

    /// Validates `submission` and writes the product with its variants,
    /// categories and tags in one transaction.
    ///
    /// ## Returns
    /// * `Ok(CreatedProduct)` - Everything committed
    /// * `Err(CatalogError::Core(..))` - Invalid input or foreign store; nothing written
    /// * `Err(..)` otherwise - Rolled back; safe to retry
    pub async fn create_product(
        &self,
        actor: &SellerActor,
        submission: &ProductSubmission,
    ) -> CatalogResult<CreatedProduct> {
        let bundle = prepare_bundle(submission)?;
        let started = Instant::now();

        debug!(
            store_id = %bundle.product.store_id,
            variants = bundle.variants.len(),
            categories = bundle.categories.len(),
            tags = bundle.tags.len(),
            "Submission validated, opening transaction"
        );

        // The deadline covers the statements only; COMMIT is never cancelled.
        let staged = self.stage_in_transaction(actor, &bundle);

        let (tx, created) = match tokio::time::timeout(self.transaction_timeout, staged).await {
            Ok(Ok(staged)) => staged,
            Ok(Err(err)) => {
                warn!(error = %err, retryable = err.is_retryable(), "Product creation failed");
                return Err(err);
            }
            Err(_) => {
                warn!(timeout = ?self.transaction_timeout, "Product transaction timed out");
                return Err(CatalogError::Timeout(self.transaction_timeout));
            }
        };

        tx.commit().await.map_err(|err| {
            let err = CatalogError::from(err);
            error!(error = %err, "Commit failed");
            err
        })?;

        info!(
            product_id = %created.product_id,
            variants = created.skus.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Product created"
        );
        Ok(created)
    }

    /// Opens a transaction and runs every insert in it without committing.
    /// On error the transaction is rolled back; dropping the returned
    /// transaction rolls it back as well.
    async fn stage_in_transaction(
        &self,
        actor: &SellerActor,
        bundle: &ValidatedBundle,
    ) -> CatalogResult<(Transaction<'static, Sqlite>, CreatedProduct)> {
        let mut tx = self.pool.begin().await?;

        match write_bundle(&mut tx, actor, bundle).await {
            Ok(created) => Ok((tx, created)),
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, store_id, name, description, status, created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    pub async fn variants_for(&self, product_id: &str) -> DbResult<Vec<ProductVariant>> {
        let variants = sqlx::query_as::<_, ProductVariant>(
            r#"
            SELECT id, product_id, sku, name, color, size, price, quantity,
                   created_at, updated_at
            FROM product_variants
            WHERE product_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(variants)
    }

    pub async fn categories_for(&self, product_id: &str) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT c.id, c.name, c.slug, c.parent_id, c.created_at
            FROM categories c
            INNER JOIN products_to_categories pc ON pc.category_id = c.id
            WHERE pc.product_id = ?1
            ORDER BY c.name
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn tags_for(&self, product_id: &str) -> DbResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.description, t.created_at
            FROM tags t
            INNER JOIN product_to_tags pt ON pt.tag_id = t.id
            WHERE pt.product_id = ?1
            ORDER BY t.name
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// Products of one store, newest first.
    pub async fn list_for_store(&self, store_id: &str) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, store_id, name, description, status, created_at, updated_at
            FROM products
            WHERE store_id = ?1
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Row counts for the four catalog tables.
    pub async fn counts(&self) -> DbResult<CatalogCounts> {
        let (products, variants, categories, tags): (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products),
                (SELECT COUNT(*) FROM product_variants),
                (SELECT COUNT(*) FROM categories),
                (SELECT COUNT(*) FROM tags)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(CatalogCounts {
            products,
            variants,
            categories,
            tags,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::repository::fixtures::{self, shirt};
    use market_core::submission::{CategoryInput, TagInput, VariantInput};
    use market_core::{CoreError, ProductStatus, RecordSet, VariantSize};

    fn tag(name: &str) -> TagInput {
        TagInput {
            name: name.to_string(),
            description: "Seasonal pick".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_product_writes_every_table() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut submission = shirt(&store.id);
        submission.variants.push(VariantInput {
            name: "Red L".to_string(),
            color: "#dc143c".to_string(),
            size: "L".to_string(),
            price: 2200,
            quantity: 0,
        });
        submission.categories.push(CategoryInput {
            name: "Summer".to_string(),
        });

        let created = db.products().create_product(&actor, &submission).await.unwrap();

        let counts = db.products().counts().await.unwrap();
        assert_eq!(
            counts,
            CatalogCounts {
                products: 1,
                variants: 2,
                categories: 2,
                tags: 0,
            }
        );

        let product = db.products().get_by_id(&created.product_id).await.unwrap().unwrap();
        assert_eq!(product.store_id, store.id);
        assert_eq!(product.status, ProductStatus::Draft);

        let variants = db.products().variants_for(&created.product_id).await.unwrap();
        assert_eq!(variants.len(), 2);
        assert!(variants.iter().all(|v| v.product_id == created.product_id));
        assert_eq!(variants[1].color, "#DC143C");
        assert_eq!(variants[1].size, VariantSize::L);
        assert_eq!(created.skus, variants.iter().map(|v| v.sku.clone()).collect::<Vec<_>>());

        let categories = db.products().categories_for(&created.product_id).await.unwrap();
        assert_eq!(categories.len(), 2);
        assert!(db.products().tags_for(&created.product_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tags_are_written_and_reused() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut first = shirt(&store.id);
        first.tags = Some(vec![tag("Summer"), tag("Cotton")]);
        let a = db.products().create_product(&actor, &first).await.unwrap();

        let mut second = shirt(&store.id);
        second.tags = Some(vec![tag("Summer")]);
        let b = db.products().create_product(&actor, &second).await.unwrap();

        assert_eq!(a.tag_ids.len(), 2);
        assert_eq!(b.tag_ids[0], a.tag_ids[0]);
        assert_eq!(db.products().counts().await.unwrap().tags, 2);

        let names: Vec<String> = db
            .products()
            .tags_for(&a.product_id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Cotton".to_string(), "Summer".to_string()]);
    }

    #[tokio::test]
    async fn test_resubmission_creates_distinct_product() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let a = db.products().create_product(&actor, &shirt(&store.id)).await.unwrap();
        let b = db.products().create_product(&actor, &shirt(&store.id)).await.unwrap();

        assert_ne!(a.product_id, b.product_id);
        assert_ne!(a.skus, b.skus);
        assert_eq!(db.products().list_for_store(&store.id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_zero_categories_writes_nothing() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut submission = shirt(&store.id);
        submission.categories.clear();

        let err = db.products().create_product(&actor, &submission).await.unwrap_err();

        match &err {
            CatalogError::Core(CoreError::InvalidSubmission(e)) => {
                assert_eq!(e.failed_sets(), vec![RecordSet::Categories])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_retryable());
        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());
    }

    #[tokio::test]
    async fn test_one_char_tag_writes_nothing() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut submission = shirt(&store.id);
        submission.tags = Some(vec![tag("x")]);

        let err = db.products().create_product(&actor, &submission).await.unwrap_err();

        assert_eq!(err.field_errors()[0].path, "tags[0].name");
        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());
    }

    #[tokio::test]
    async fn test_foreign_and_inactive_stores_write_nothing() {
        let db = fixtures::database().await;
        let (_, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;
        let (intruder, closed) = fixtures::seller_with_store(&db, "eve@example.com", false).await;

        let err = db
            .products()
            .create_product(&intruder, &shirt(&store.id))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Core(CoreError::StoreNotOwned { .. })
        ));

        let err = db
            .products()
            .create_product(&intruder, &shirt(&closed.id))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Core(CoreError::StoreInactive(_))));

        let err = db
            .products()
            .create_product(&intruder, &shirt("6fa459ea-ee8a-3ca4-894e-db77e160355e"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Core(CoreError::StoreNotFound(_))));

        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());
    }

    #[tokio::test]
    async fn test_failing_statement_rolls_back_everything() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        sqlx::query(
            r#"
            CREATE TRIGGER tags_unavailable BEFORE INSERT ON tags
            BEGIN
                SELECT RAISE(ABORT, 'tags unavailable');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let mut submission = shirt(&store.id);
        submission.tags = Some(vec![tag("Summer")]);

        let err = db.products().create_product(&actor, &submission).await.unwrap_err();

        assert!(matches!(err, CatalogError::Db(DbError::QueryFailed(_))));
        assert!(err.is_retryable());
        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());
    }

    #[tokio::test]
    async fn test_sku_collision_is_a_retryable_conflict() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let first = db.products().create_product(&actor, &shirt(&store.id)).await.unwrap();

        // Force the next variant insert to collide with the committed SKU.
        sqlx::query(&format!(
            r#"
            CREATE TRIGGER sku_collision BEFORE INSERT ON product_variants
            BEGIN
                UPDATE product_variants SET sku = NEW.sku WHERE sku = '{}';
            END
            "#,
            first.skus[0]
        ))
        .execute(db.pool())
        .await
        .unwrap();

        let err = db.products().create_product(&actor, &shirt(&store.id)).await.unwrap_err();

        assert!(matches!(err, CatalogError::Db(DbError::UniqueViolation { .. })));
        assert!(err.is_retryable());
        assert_eq!(db.products().counts().await.unwrap().products, 1);
    }

    #[tokio::test]
    async fn test_elapsed_timeout_is_reported() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let repo = ProductRepository::new(db.pool().clone(), Duration::ZERO);
        let err = repo.create_product(&actor, &shirt(&store.id)).await.unwrap_err();

        assert!(matches!(err, CatalogError::Timeout(d) if d == Duration::ZERO));
        assert!(err.is_retryable());
        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());
    }

    #[tokio::test]
    async fn test_staged_transaction_commits_only_when_asked() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;
        let bundle = prepare_bundle(&shirt(&store.id)).unwrap();

        let (tx, _) = db.products().stage_in_transaction(&actor, &bundle).await.unwrap();
        drop(tx);
        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());

        let (tx, created) = db.products().stage_in_transaction(&actor, &bundle).await.unwrap();
        tx.commit().await.unwrap();
        assert!(db.products().get_by_id(&created.product_id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_negative_variant_price_writes_nothing() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut submission = shirt(&store.id);
        submission.variants[0].price = -1;

        let err = db.products().create_product(&actor, &submission).await.unwrap_err();

        match &err {
            CatalogError::Core(CoreError::InvalidSubmission(e)) => {
                assert_eq!(e.failed_sets(), vec![RecordSet::Variants])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.field_errors()[0].path, "variants[0].price");
        assert_eq!(db.products().counts().await.unwrap(), CatalogCounts::default());
    }

    #[tokio::test]
    async fn test_tag_reuse_ignores_case() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut first = shirt(&store.id);
        first.tags = Some(vec![tag("Summer")]);
        let a = db.products().create_product(&actor, &first).await.unwrap();

        let mut second = shirt(&store.id);
        second.tags = Some(vec![tag("summer")]);
        let b = db.products().create_product(&actor, &second).await.unwrap();

        assert_eq!(a.tag_ids, b.tag_ids);
        assert_eq!(db.products().counts().await.unwrap().tags, 1);
        assert_eq!(db.products().tags_for(&b.product_id).await.unwrap()[0].name, "Summer");
    }

    #[tokio::test]
    async fn test_archive_status_is_stored_as_archived() {
        let db = fixtures::database().await;
        let (actor, store) = fixtures::seller_with_store(&db, "ada@example.com", true).await;

        let mut submission = shirt(&store.id);
        submission.status = "archive".to_string();
        let created = db.products().create_product(&actor, &submission).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT status FROM products WHERE id = ?1")
            .bind(&created.product_id)
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, "archived");
    }
}
