//! # Transactional Writer
//!
//! Persists a [`ValidatedBundle`] inside one transaction.
//!
//! ## Write Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BEGIN                                                                  │
//! │   0. store_owner(store_id)      exists? owned by actor? active?         │
//! │   1. insert_product ──────────► product id  (None → MissingProductId)   │
//! │   2. attach_product_id (phase 2) ──► insert_variants (one batch)        │
//! │   3. insert_categories ──► link_categories                              │
//! │   4. tags non-empty? ──► insert_tags (upsert by name) ──► link_tags     │
//! │  COMMIT   (any error above → ROLLBACK, nothing persists)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`write_bundle`] only talks to the [`CatalogTransaction`] trait, so the
//! step order can be tested against a fake without SQLite. Commit and
//! rollback belong to the caller (see `ProductRepository::create_product`).

use serde::Serialize;
use sqlx::{QueryBuilder, Sqlite, Transaction};
use tracing::{debug, instrument};

use crate::error::{CatalogError, CatalogResult, DbResult};
use market_core::catalog::{
    attach_product_id, CategoryRecord, ProductRecord, TagRecord, ValidatedBundle, VariantRecord,
};
use market_core::{CoreError, SellerActor};

/// Owner and state of a store, read inside the transaction.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StoreOwnership {
    pub seller_id: String,
    pub is_active: bool,
}

/// What a successful product creation returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedProduct {
    pub product_id: String,
    pub skus: Vec<String>,
    pub category_ids: Vec<String>,
    pub tag_ids: Vec<String>,
}

/// The per-table operations the writer needs from an open transaction.
#[allow(async_fn_in_trait)]
pub trait CatalogTransaction {
    async fn store_owner(&mut self, store_id: &str) -> DbResult<Option<StoreOwnership>>;

    /// Inserts the product and returns the id generated by storage.
    async fn insert_product(&mut self, product: &ProductRecord) -> DbResult<Option<String>>;

    /// Inserts every variant in one statement. Returns the rows written.
    async fn insert_variants(&mut self, variants: &[VariantRecord]) -> DbResult<u64>;

    /// Returns the new category ids in input order.
    async fn insert_categories(&mut self, categories: &[CategoryRecord]) -> DbResult<Vec<String>>;

    /// Inserts tags, reusing any existing tag with the same name. Returns ids
    /// in input order.
    async fn insert_tags(&mut self, tags: &[TagRecord]) -> DbResult<Vec<String>>;

    async fn link_categories(&mut self, product_id: &str, category_ids: &[String]) -> DbResult<()>;

    async fn link_tags(&mut self, product_id: &str, tag_ids: &[String]) -> DbResult<()>;
}

/// Runs steps 0 to 4 against `tx`. The caller commits on `Ok` and rolls
/// back on `Err`.
#[instrument(skip_all, fields(store_id = %bundle.product.store_id, seller_id = %actor.seller_id))]
pub async fn write_bundle<T: CatalogTransaction>(
    tx: &mut T,
    actor: &SellerActor,
    bundle: &ValidatedBundle,
) -> CatalogResult<CreatedProduct> {
    let store_id = &bundle.product.store_id;

    // 0. Ownership
    match tx.store_owner(store_id).await? {
        None => return Err(CoreError::StoreNotFound(store_id.clone()).into()),
        Some(owner) if owner.seller_id != actor.seller_id => {
            return Err(CoreError::StoreNotOwned {
                store_id: store_id.clone(),
                seller_id: actor.seller_id.clone(),
            }
            .into())
        }
        Some(owner) if !owner.is_active => {
            return Err(CoreError::StoreInactive(store_id.clone()).into())
        }
        Some(_) => {}
    }

    // 1. Product
    let product_id = tx
        .insert_product(&bundle.product)
        .await?
        .ok_or(CatalogError::MissingProductId)?;
    debug!(product_id = %product_id, "Product row inserted");

    // 2. Variants
    let variants =
        attach_product_id(&product_id, &bundle.variants).map_err(CatalogError::VariantStage)?;
    if !variants.is_empty() {
        let written = tx.insert_variants(&variants).await?;
        debug!(count = written, "Variant rows inserted");
    }

    // 3. Categories
    let category_ids = tx.insert_categories(&bundle.categories).await?;
    tx.link_categories(&product_id, &category_ids).await?;
    debug!(count = category_ids.len(), "Categories linked");

    // 4. Tags
    let tag_ids = if bundle.has_tags() {
        let ids = tx.insert_tags(&bundle.tags).await?;
        tx.link_tags(&product_id, &ids).await?;
        debug!(count = ids.len(), "Tags linked");
        ids
    } else {
        Vec::new()
    };

    Ok(CreatedProduct {
        product_id,
        skus: variants.into_iter().map(|v| v.sku).collect(),
        category_ids,
        tag_ids,
    })
}

// =============================================================================
// SQLite implementation
// =============================================================================

impl CatalogTransaction for Transaction<'_, Sqlite> {
    async fn store_owner(&mut self, store_id: &str) -> DbResult<Option<StoreOwnership>> {
        let owner = sqlx::query_as::<_, StoreOwnership>(
            "SELECT seller_id, is_active FROM stores WHERE id = ?1",
        )
        .bind(store_id)
        .fetch_optional(&mut **self)
        .await?;

        Ok(owner)
    }

    async fn insert_product(&mut self, product: &ProductRecord) -> DbResult<Option<String>> {
        let id: Option<String> = sqlx::query_scalar(
            r#"
            INSERT INTO products (store_id, name, description, status)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(&product.store_id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.status)
        .fetch_optional(&mut **self)
        .await?;

        Ok(id)
    }

    async fn insert_variants(&mut self, variants: &[VariantRecord]) -> DbResult<u64> {
        if variants.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO product_variants (product_id, sku, name, color, size, price, quantity) ",
        );
        builder.push_values(variants, |mut row, v| {
            row.push_bind(v.product_id.clone())
                .push_bind(v.sku.clone())
                .push_bind(v.name.clone())
                .push_bind(v.color.hex())
                .push_bind(v.size)
                .push_bind(v.price)
                .push_bind(v.quantity);
        });

        let result = builder.build().execute(&mut **self).await?;
        Ok(result.rows_affected())
    }

    async fn insert_categories(&mut self, categories: &[CategoryRecord]) -> DbResult<Vec<String>> {
        let mut ids = Vec::with_capacity(categories.len());
        for category in categories {
            let id: String = sqlx::query_scalar(
                "INSERT INTO categories (name, slug) VALUES (?1, ?2) RETURNING id",
            )
            .bind(&category.name)
            .bind(&category.slug)
            .fetch_one(&mut **self)
            .await?;
            ids.push(id);
        }
        Ok(ids)
    }

    async fn insert_tags(&mut self, tags: &[TagRecord]) -> DbResult<Vec<String>> {
        let mut ids = Vec::with_capacity(tags.len());
        for tag in tags {
            let id: String = sqlx::query_scalar(
                r#"
                INSERT INTO tags (name, description) VALUES (?1, ?2)
                ON CONFLICT(name) DO UPDATE
                    SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
                RETURNING id
                "#,
            )
            .bind(&tag.name)
            .bind(&tag.description)
            .fetch_one(&mut **self)
            .await?;
            ids.push(id);
        }
        Ok(ids)
    }

    async fn link_categories(&mut self, product_id: &str, category_ids: &[String]) -> DbResult<()> {
        for category_id in category_ids {
            sqlx::query(
                "INSERT INTO products_to_categories (product_id, category_id) VALUES (?1, ?2)",
            )
            .bind(product_id)
            .bind(category_id)
            .execute(&mut **self)
            .await?;
        }
        Ok(())
    }

    async fn link_tags(&mut self, product_id: &str, tag_ids: &[String]) -> DbResult<()> {
        for tag_id in tag_ids {
            sqlx::query("INSERT INTO product_to_tags (product_id, tag_id) VALUES (?1, ?2)")
                .bind(product_id)
                .bind(tag_id)
                .execute(&mut **self)
                .await?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
