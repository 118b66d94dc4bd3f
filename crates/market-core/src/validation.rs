//! # Validation Module
//!
//! Field-level validators shared by the catalog and onboarding rules.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront form (TypeScript)                                 │
//! │  ├── Same length/enum rules, immediate feedback                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: market-core                                                  │
//! │  ├── THIS MODULE: one rule per field                                   │
//! │  └── catalog / onboarding: whole-record checks, derived fields         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  ├── UNIQUE constraints (sku, slug, tag name)                          │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator takes the field name it reports under, so the same rule
//! can back `name`, `variants[2].name` and `storeName`.

use crate::error::ValidationError;
use crate::slug::is_valid_slug;
use crate::MAX_SLUG_LEN;
use url::Url;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates the trimmed character count of `value` against `min..=max`.
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_length;
///
/// assert!(validate_length("name", "Shirt", 3, 15).is_ok());
/// assert!(validate_length("name", "  ", 3, 15).is_err());
/// assert!(validate_length("name", "Hi", 3, 15).is_err());
/// ```
pub fn validate_length(field: &str, value: &str, min: usize, max: usize) -> ValidationResult<()> {
    let value = value.trim();
    let len = value.chars().count();

    if len == 0 && min > 0 {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if len < min {
        return Err(ValidationError::TooShort {
            field: field.to_string(),
            min,
        });
    }

    if len > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a derived slug or SKU.
///
/// ## Rules
/// - Lowercase ASCII letters and digits in hyphen-joined segments
/// - Ends in a 6-character random suffix
/// - At most [`MAX_SLUG_LEN`] characters
pub fn validate_slug(field: &str, slug: &str) -> ValidationResult<()> {
    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_SLUG_LEN,
        });
    }

    if !is_valid_slug(slug) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be lowercase letters and digits separated by hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_uuid;
///
/// assert!(validate_uuid("storeId", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("storeId", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates an identifier generated by the database (non-empty, no
/// surrounding whitespace).
pub fn validate_generated_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.is_empty() || id.trim() != id {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an optional image URL. `None` and `""` both mean "no image".
///
/// The value must parse as an absolute `http` or `https` URL with a host.
pub fn validate_optional_url(field: &str, url: Option<&str>) -> ValidationResult<()> {
    let Some(raw) = url.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(());
    };

    let invalid = |reason: String| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason,
    };

    let parsed = Url::parse(raw).map_err(|e| invalid(format!("must be a valid URL ({e})")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("must use http or https".to_string()));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("must include a host".to_string()));
    }

    Ok(())
}

/// Validates a 10-digit phone number.
pub fn validate_phone_number(field: &str, phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();
    if phone.len() != 10 || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a 10-digit mobile number".to_string(),
        });
    }
    Ok(())
}

/// Validates a Stripe account id: `<2-10 lowercase>_<14-255 alphanumerics>`.
pub fn validate_stripe_account_id(field: &str, id: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must look like acct_XXXXXXXXXXXXXX".to_string(),
    };

    let (prefix, body) = id.trim().split_once('_').ok_or_else(invalid)?;

    let prefix_ok = (2..=10).contains(&prefix.len()) && prefix.chars().all(|c| c.is_ascii_lowercase());
    let body_ok = (14..=255).contains(&body.len()) && body.chars().all(|c| c.is_ascii_alphanumeric());

    if prefix_ok && body_ok {
        Ok(())
    } else {
        Err(invalid())
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in the smallest currency unit.
///
/// ## Example
/// ```rust
/// use market_core::validation::validate_price;
///
/// assert!(validate_price("price", 1099).is_ok());
/// assert!(validate_price("price", 0).is_ok());     // Free item
/// assert!(validate_price("price", -100).is_err());
/// ```
pub fn validate_price(field: &str, price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Validates a stock quantity. Zero is allowed (listed but sold out).
pub fn validate_stock_quantity(field: &str, quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_length() {
        assert!(validate_length("name", "Shirt", 3, 15).is_ok());
        assert!(validate_length("name", "  Shirt  ", 3, 15).is_ok());
        assert_eq!(
            validate_length("name", "", 3, 15),
            Err(ValidationError::Required {
                field: "name".to_string()
            })
        );
        assert!(matches!(
            validate_length("name", "ab", 3, 15),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(matches!(
            validate_length("name", &"a".repeat(16), 3, 15),
            Err(ValidationError::TooLong { max: 15, .. })
        ));
        assert!(validate_length("storeDescription", "", 0, 250).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(validate_length("name", "ééé", 3, 3).is_ok());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("sku", "red-m-m-000000-ab12cd").is_ok());
        assert!(validate_slug("sku", "-ab12cd").is_err());
        assert!(validate_slug("sku", &format!("{}-ab12cd", "a".repeat(64))).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("storeId", "550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("storeId", "").is_err());
        assert!(validate_uuid("storeId", "123").is_err());
    }

    #[test]
    fn test_validate_optional_url() {
        assert!(validate_optional_url("logoImage", None).is_ok());
        assert!(validate_optional_url("logoImage", Some("")).is_ok());
        assert!(validate_optional_url("logoImage", Some("https://cdn.example.com/a.png")).is_ok());
        assert!(validate_optional_url("logoImage", Some("ftp://x")).is_err());
        assert!(validate_optional_url("logoImage", Some("https://")).is_err());
        assert!(validate_optional_url("logoImage", Some("https://a b")).is_err());
        assert!(validate_optional_url("logoImage", Some("https://[oops")).is_err());
        assert!(validate_optional_url("logoImage", Some("http://exa%mple.com")).is_err());
        assert!(validate_optional_url("logoImage", Some("https://a:b:c")).is_err());
        assert!(validate_optional_url("logoImage", Some("mailto:shop@example.com")).is_err());
        assert!(validate_optional_url("logoImage", Some("http://127.0.0.1:8080/x.png")).is_ok());
    }

    #[test]
    fn test_validate_phone_number() {
        assert!(validate_phone_number("phoneNumber", "9876543210").is_ok());
        assert!(validate_phone_number("phoneNumber", "98765").is_err());
        assert!(validate_phone_number("phoneNumber", "98765432ab").is_err());
    }

    #[test]
    fn test_validate_stripe_account_id() {
        assert!(validate_stripe_account_id("stripeAccountId", "acct_1A2b3C4d5E6f7G8h").is_ok());
        assert!(validate_stripe_account_id("stripeAccountId", "acct_short").is_err());
        assert!(validate_stripe_account_id("stripeAccountId", "ACCT_1A2b3C4d5E6f7G8h").is_err());
        assert!(validate_stripe_account_id("stripeAccountId", "acct1A2b3C4d5E6f7G8h").is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_price("price", 0).is_ok());
        assert!(validate_price("price", -1).is_err());
        assert!(validate_stock_quantity("quantity", 0).is_ok());
        assert!(validate_stock_quantity("quantity", -5).is_err());
    }
}
