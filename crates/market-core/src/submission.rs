//! # Form Submissions
//!
//! Raw input exactly as the storefront forms post it.
//!
//! Enum-like fields (`status`, `size`, `color`) stay strings here so that an
//! unknown token becomes a field-level [`ValidationError`](crate::ValidationError)
//! instead of a deserialization failure.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The "Create Product" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductSubmission {
    pub name: String,
    pub description: String,
    pub status: String,
    pub store_id: String,
    pub variants: Vec<VariantInput>,
    pub categories: Vec<CategoryInput>,
    #[serde(default)]
    pub tags: Option<Vec<TagInput>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub name: String,
    pub color: String,
    pub size: String,
    /// Smallest currency unit.
    pub price: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TagInput {
    pub name: String,
    pub description: String,
}

/// The "Create Store" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreApplication {
    pub store_name: String,
    #[serde(default)]
    pub store_description: Option<String>,
    /// Empty string means "no image".
    #[serde(default)]
    pub logo_image: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    pub is_active: bool,
}

/// The "Become a Seller" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SellerApplication {
    pub business_name: String,
    /// Ten digits, as typed.
    pub phone_number: String,
    pub stripe_account_id: String,
    pub agreed_to_terms: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_from_storefront_json() {
        let json = r##"{
            "name": "Shirt",
            "description": "Soft cotton shirt",
            "status": "draft",
            "storeId": "550e8400-e29b-41d4-a716-446655440000",
            "variants": [
                {"name": "Red M", "color": "#000000", "size": "m", "price": 20, "quantity": 5}
            ],
            "categories": [{"name": "Apparel"}]
        }"##;

        let submission: ProductSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.variants.len(), 1);
        assert_eq!(submission.categories[0].name, "Apparel");
        assert!(submission.tags.is_none());
    }
}
