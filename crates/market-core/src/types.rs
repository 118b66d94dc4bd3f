//! # Domain Types
//!
//! Core domain types used throughout the marketplace.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  User ──1:1── Seller ──1:N── Store ──1:N── Product ──1:N── Variant     │
//! │                                              │                          │
//! │                                              ├──N:M── Category          │
//! │                                              └──N:M── Tag               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductStatus  │   │   VariantSize   │   │  VariantColor   │       │
//! │  │  Draft          │   │  xs s m l xl    │   │  fixed palette  │       │
//! │  │  Active         │   │  xxl            │   │  of four hexes  │       │
//! │  │  Archived       │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows read back from the database are plain structs here; the enums carry
//! optional sqlx derives behind the `sqlx` feature so market-db can bind them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// User Role
// =============================================================================

/// Role of an account. Every new user starts as a buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum UserRole {
    Seller,
    #[default]
    Buyer,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Seller => "Seller",
            UserRole::Buyer => "Buyer",
        }
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Publication status of a product.
///
/// The storefront form sends `archive`; the stored token is `archived`.
/// Both spellings are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Active,
    #[serde(rename = "archive", alias = "archived")]
    Archived,
}

impl ProductStatus {
    /// Tokens accepted by [`ProductStatus::parse`].
    pub const TOKENS: [&'static str; 3] = ["draft", "active", "archive"];

    /// Parses a form token.
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(ProductStatus::Draft),
            "active" => Some(ProductStatus::Active),
            "archive" | "archived" => Some(ProductStatus::Archived),
            _ => None,
        }
    }
}

// =============================================================================
// Variant Size
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum VariantSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

impl VariantSize {
    pub const ALL: [VariantSize; 6] = [
        VariantSize::Xs,
        VariantSize::S,
        VariantSize::M,
        VariantSize::L,
        VariantSize::Xl,
        VariantSize::Xxl,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            VariantSize::Xs => "xs",
            VariantSize::S => "s",
            VariantSize::M => "m",
            VariantSize::L => "l",
            VariantSize::Xl => "xl",
            VariantSize::Xxl => "xxl",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        VariantSize::ALL.into_iter().find(|s| s.as_str() == token)
    }
}

// =============================================================================
// Variant Color
// =============================================================================

/// The fixed palette a seller can pick variant colors from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum VariantColor {
    ClassicBlack,
    SnowWhite,
    ForestGreen,
    CrimsonRed,
}

impl VariantColor {
    pub const PALETTE: [VariantColor; 4] = [
        VariantColor::ClassicBlack,
        VariantColor::SnowWhite,
        VariantColor::ForestGreen,
        VariantColor::CrimsonRed,
    ];

    /// Canonical (uppercase) hex code, as stored.
    pub const fn hex(&self) -> &'static str {
        match self {
            VariantColor::ClassicBlack => "#000000",
            VariantColor::SnowWhite => "#FFFFFF",
            VariantColor::ForestGreen => "#228B22",
            VariantColor::CrimsonRed => "#DC143C",
        }
    }

    /// Display name shown in the color picker.
    pub const fn display_name(&self) -> &'static str {
        match self {
            VariantColor::ClassicBlack => "Classic Black",
            VariantColor::SnowWhite => "Snow White",
            VariantColor::ForestGreen => "Forest Green",
            VariantColor::CrimsonRed => "Crimson Red",
        }
    }

    /// Looks up a palette entry by hex code, ignoring case.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        VariantColor::PALETTE
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex))
    }
}

// =============================================================================
// Accounts
// =============================================================================

/// A user account as mirrored from the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A seller account attached to a user.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub id: String,
    pub user_id: String,
    pub business_name: String,
    pub phone_number: String,
    pub stripe_account_id: Option<String>,
    pub is_verified: bool,
    pub agreed_to_terms: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// The already-authenticated seller performing a catalog operation.
///
/// Built by the caller from its session; the core never reads ambient
/// session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerActor {
    pub user_id: String,
    pub seller_id: String,
}

// =============================================================================
// Stores
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub seller_id: String,
    pub store_name: String,
    pub store_description: Option<String>,
    pub slug: String,
    pub logo_image: Option<String>,
    pub cover_image: Option<String>,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Row of the seller dashboard's store table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreSummary {
    pub store_name: String,
    pub is_active: bool,
    pub store_id: String,
}

// =============================================================================
// Catalog
// =============================================================================

/// A persisted product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub store_id: String,
    pub name: String,
    pub description: Option<String>,
    pub status: ProductStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A persisted product variant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: String,
    pub product_id: String,
    pub sku: String,
    pub name: String,
    /// Hex code from the palette.
    pub color: String,
    pub size: VariantSize,
    /// Price in the smallest currency unit.
    pub price: i64,
    pub quantity: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_both_archive_spellings() {
        assert_eq!(ProductStatus::parse("archive"), Some(ProductStatus::Archived));
        assert_eq!(ProductStatus::parse("Archived"), Some(ProductStatus::Archived));
        assert_eq!(ProductStatus::parse("deleted"), None);

        let status: ProductStatus = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(status, ProductStatus::Archived);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"archive\"");
    }

    #[test]
    fn test_size_tokens() {
        assert_eq!(VariantSize::parse("XL"), Some(VariantSize::Xl));
        assert_eq!(VariantSize::parse("xxxl"), None);
        assert_eq!(VariantSize::Xxl.as_str(), "xxl");
    }

    #[test]
    fn test_palette_lookup_ignores_case() {
        assert_eq!(
            VariantColor::from_hex("#dc143c"),
            Some(VariantColor::CrimsonRed)
        );
        assert_eq!(VariantColor::from_hex("#123456"), None);
        assert_eq!(VariantColor::SnowWhite.hex(), "#FFFFFF");
    }

    #[test]
    fn test_role_default() {
        assert_eq!(UserRole::default(), UserRole::Buyer);
    }
}
