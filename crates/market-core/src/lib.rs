//! # market-core: Pure Business Logic for the Marketplace Catalog
//!
//! This crate turns raw storefront form input into storage-ready records.
//! It contains no I/O: everything here can be tested without a database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Marketplace Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront (Next.js, out of workspace)             │   │
//! │  │   Create Product modal ──► Create Store modal ──► Seller modal  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductSubmission (JSON)               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ market-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   slug    │  │ onboarding│  │ validation│  │   │
//! │  │   │ Validator │  │ slugify   │  │ Seller    │  │  field    │  │   │
//! │  │   │ Bundle    │  │ suffix    │  │ Store     │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │ ValidatedBundle                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  market-db (Transactional Writer)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, ProductVariant, Store, roles, enums)
//! - [`submission`] - Raw form input as submitted by the storefront
//! - [`catalog`] - The product Validator (both validation phases)
//! - [`slug`] - Slug / SKU derivation
//! - [`onboarding`] - Seller and store registration rules
//! - [`access`] - Role-based dashboard gate
//! - [`validation`] - Field-level validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use market_core::catalog::prepare_bundle;
//! use market_core::submission::{CategoryInput, ProductSubmission, VariantInput};
//!
//! let submission = ProductSubmission {
//!     name: "Shirt".to_string(),
//!     description: "A plain cotton shirt".to_string(),
//!     status: "draft".to_string(),
//!     store_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
//!     variants: vec![VariantInput {
//!         name: "Red M".to_string(),
//!         color: "#000000".to_string(),
//!         size: "m".to_string(),
//!         price: 20,
//!         quantity: 5,
//!     }],
//!     categories: vec![CategoryInput { name: "Apparel".to_string() }],
//!     tags: None,
//! };
//!
//! let bundle = prepare_bundle(&submission).unwrap();
//! assert!(bundle.variants[0].sku.starts_with("red-m-m-000000-"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod catalog;
pub mod error;
pub mod onboarding;
pub mod slug;
pub mod submission;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, FieldError, RecordSet, SubmissionError, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of the random suffix appended to every slug and SKU.
pub const SLUG_SUFFIX_LEN: usize = 6;

/// Longest slug or SKU accepted for storage.
pub const MAX_SLUG_LEN: usize = 64;

/// Product name length bounds (characters).
pub const PRODUCT_NAME_LEN: (usize, usize) = (3, 15);

/// Product description length bounds.
pub const PRODUCT_DESCRIPTION_LEN: (usize, usize) = (10, 300);

/// Variant name length bounds.
pub const VARIANT_NAME_LEN: (usize, usize) = (3, 15);

/// Category name length bounds.
pub const CATEGORY_NAME_LEN: (usize, usize) = (3, 10);

/// Tag name length bounds.
pub const TAG_NAME_LEN: (usize, usize) = (3, 10);

/// Tag description length bounds.
pub const TAG_DESCRIPTION_LEN: (usize, usize) = (3, 300);
