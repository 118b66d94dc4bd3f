//! # Repository Module
//!
//! Data access layer for marketplace entities.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Repository Pattern                                 │
//! │                                                                         │
//! │  Caller (HTTP handler, seed binary, tests)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository (ProductRepository, StoreRepository, ...)                  │
//! │  • Validates input through market-core first                           │
//! │  • Owns transaction boundaries                                         │
//! │  • Returns domain types from market-core                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (via sqlx::SqlitePool)                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//! - [`product::ProductRepository`] - Product creation and catalog read-back
//! - [`store::StoreRepository`] - Store registration and listing
//! - [`seller::SellerRepository`] - Seller onboarding
//! - [`user::UserRepository`] - Accounts and roles

pub mod product;
pub mod seller;
pub mod store;
pub mod user;
