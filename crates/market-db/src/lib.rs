//! # market-db: Database Layer for the Marketplace
//!
//! SQLite persistence for the catalog: the connection pool, embedded
//! migrations, repositories and the transactional product writer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Creation Data Flow                         │
//! │                                                                         │
//! │  Storefront action (createProduct)                                     │
//! │       │ SellerActor + ProductSubmission                                │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     market-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    writer    │  │   │
//! │  │   │   (pool.rs)   │    │               │    │              │  │   │
//! │  │   │               │    │ ProductRepo ──┼───►│ write_bundle │  │   │
//! │  │   │ SqlitePool    │◄───│ StoreRepo     │    │ Catalog-     │  │   │
//! │  │   │ Migrations    │    │ SellerRepo    │    │ Transaction  │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (users, sellers, stores, products, product_variants,           │
//! │          categories, tags, join tables)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`writer`] - The transactional product writer
//! - [`repository`] - Repository implementations
//! - [`config`] - Environment configuration and logging setup
//! - [`error`] - Database and catalog error types
//! - [`api`] - Serializable error envelope for the storefront
//!
//! ## Usage
//!
//! ```rust,ignore
//! use market_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("market.db")).await?;
//! let actor = db.sellers().actor_for(&session_user_id).await?;
//! let created = db.products().create_product(&actor, &submission).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{ApiError, ErrorCode};
pub use config::{ConfigError, MarketConfig};
pub use error::{CatalogError, DbError};
pub use pool::{Database, DbConfig};
pub use writer::{CatalogTransaction, CreatedProduct};

pub use repository::product::{CatalogCounts, ProductRepository};
pub use repository::seller::SellerRepository;
pub use repository::store::StoreRepository;
pub use repository::user::UserRepository;
