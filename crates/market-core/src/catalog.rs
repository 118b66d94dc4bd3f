//! # Product Validator
//!
//! Turns a [`ProductSubmission`] into storage-ready records in two phases.
//!
//! ## Two-Phase Validation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PHASE 1 (before any I/O)                                              │
//! │                                                                         │
//! │  ProductSubmission                                                     │
//! │    ├── derive_product_fields ──► ProductCore                           │
//! │    ├── derive_variants ────────► Vec<VariantDraft>   (sku derived)     │
//! │    ├── derive_categories ──────► Vec<CategoryDraft>  (slug derived)    │
//! │    └── tags (optional)                                                 │
//! │              │                                                          │
//! │              ▼                                                          │
//! │  validate_all ──► ValidatedBundle { product, variants, categories,     │
//! │                                     tags }                             │
//! │                                                                         │
//! │  PHASE 2 (inside the transaction, after the product insert)            │
//! │                                                                         │
//! │  attach_product_id(id, &bundle.variants) ──► Vec<VariantRecord>        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Phase 1 fails the whole bundle if the product, variant or category set is
//! invalid. Tags are checked only when the list is non-empty, but a bad tag
//! still fails the bundle.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{FieldError, RecordSet, SubmissionError, ValidationError};
use crate::slug::unique_slug;
use crate::submission::{CategoryInput, ProductSubmission, TagInput, VariantInput};
use crate::types::{ProductStatus, VariantColor, VariantSize};
use crate::validation::{
    validate_generated_id, validate_length, validate_price, validate_slug,
    validate_stock_quantity, validate_uuid,
};
use crate::{
    CATEGORY_NAME_LEN, PRODUCT_DESCRIPTION_LEN, PRODUCT_NAME_LEN, TAG_DESCRIPTION_LEN,
    TAG_NAME_LEN, VARIANT_NAME_LEN,
};

// =============================================================================
// Derived (unchecked) shapes
// =============================================================================

/// Product fields projected from the submission, unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCore {
    pub name: String,
    pub description: String,
    pub status: String,
    pub store_id: String,
}

/// A variant entry with its SKU derived, unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDraft {
    pub name: String,
    pub color: String,
    pub size: String,
    pub price: i64,
    pub quantity: i64,
    pub sku: String,
}

/// A category entry with its slug derived, unchecked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub slug: String,
}

// =============================================================================
// Validated records
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub store_id: String,
}

/// A checked variant that does not know its product yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnlinkedVariant {
    pub name: String,
    pub color: VariantColor,
    pub size: VariantSize,
    pub price: i64,
    pub quantity: i64,
    pub sku: String,
}

/// A variant ready for insert, stamped with its product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantRecord {
    pub product_id: String,
    pub name: String,
    pub color: VariantColor,
    pub size: VariantSize,
    pub price: i64,
    pub quantity: i64,
    pub sku: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRecord {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagRecord {
    pub name: String,
    pub description: String,
}

/// Everything phase 1 produced. An empty `tags` means "no tags".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedBundle {
    pub product: ProductRecord,
    pub variants: Vec<UnlinkedVariant>,
    pub categories: Vec<CategoryRecord>,
    pub tags: Vec<TagRecord>,
}

impl ValidatedBundle {
    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

// =============================================================================
// Derivation
// =============================================================================

/// Projects name, description, status and store id. No transformation.
pub fn derive_product_fields(data: &ProductSubmission) -> ProductCore {
    ProductCore {
        name: data.name.clone(),
        description: data.description.clone(),
        status: data.status.clone(),
        store_id: data.store_id.clone(),
    }
}

/// Derives `sku = slugify(name-size-color) + "-" + suffix` for each variant.
pub fn derive_variants(variants: &[VariantInput]) -> Vec<VariantDraft> {
    variants
        .iter()
        .map(|v| VariantDraft {
            name: v.name.clone(),
            color: v.color.clone(),
            size: v.size.clone(),
            price: v.price,
            quantity: v.quantity,
            sku: unique_slug(&format!("{}-{}-{}", v.name, v.size, v.color)),
        })
        .collect()
}

/// Derives `slug = slugify(name) + "-" + suffix` for each category.
pub fn derive_categories(categories: &[CategoryInput]) -> Vec<CategoryDraft> {
    categories
        .iter()
        .map(|c| CategoryDraft {
            name: c.name.clone(),
            slug: unique_slug(&c.name),
        })
        .collect()
}

// =============================================================================
// Phase 1
// =============================================================================

/// Runs every record set through its rules and returns the bundle only if all
/// of them pass.
pub fn validate_all(
    product: ProductCore,
    variants: Vec<VariantDraft>,
    categories: Vec<CategoryDraft>,
    tags: Option<&[TagInput]>,
) -> Result<ValidatedBundle, SubmissionError> {
    let mut report = SubmissionError::new();

    let product = collect(&mut report, RecordSet::Product, validate_product(product));
    let variants = collect(&mut report, RecordSet::Variants, validate_variants(variants));
    let categories = collect(
        &mut report,
        RecordSet::Categories,
        validate_categories(categories),
    );
    let tags = match tags {
        Some(tags) if !tags.is_empty() => {
            collect(&mut report, RecordSet::Tags, validate_tags(tags))
        }
        _ => Some(Vec::new()),
    };

    match (product, variants, categories, tags) {
        (Some(product), Some(variants), Some(categories), Some(tags)) if report.is_empty() => {
            Ok(ValidatedBundle {
                product,
                variants,
                categories,
                tags,
            })
        }
        _ => Err(report),
    }
}

/// Derives every field and validates the result. This is phase 1 end to end.
pub fn prepare_bundle(submission: &ProductSubmission) -> Result<ValidatedBundle, SubmissionError> {
    validate_all(
        derive_product_fields(submission),
        derive_variants(&submission.variants),
        derive_categories(&submission.categories),
        submission.tags.as_deref(),
    )
}

fn collect<T>(
    report: &mut SubmissionError,
    set: RecordSet,
    result: Result<T, Vec<FieldError>>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(errors) => {
            report.push(set, errors);
            None
        }
    }
}

/// Pushes the error of `check` onto `errors` under `path`.
fn check(errors: &mut Vec<FieldError>, path: impl Into<String>, result: Result<(), ValidationError>) {
    if let Err(e) = result {
        errors.push(FieldError::new(path, e));
    }
}

fn validate_product(core: ProductCore) -> Result<ProductRecord, Vec<FieldError>> {
    let mut errors = Vec::new();
    let (name_min, name_max) = PRODUCT_NAME_LEN;
    let (desc_min, desc_max) = PRODUCT_DESCRIPTION_LEN;

    check(&mut errors, "name", validate_length("name", &core.name, name_min, name_max));
    check(
        &mut errors,
        "description",
        validate_length("description", &core.description, desc_min, desc_max),
    );
    check(&mut errors, "storeId", validate_uuid("storeId", &core.store_id));

    let status = ProductStatus::parse(&core.status);
    if status.is_none() {
        errors.push(FieldError::new(
            "status",
            ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: ProductStatus::TOKENS.iter().map(|t| t.to_string()).collect(),
            },
        ));
    }

    match status {
        Some(status) if errors.is_empty() => Ok(ProductRecord {
            name: core.name.trim().to_string(),
            description: core.description.trim().to_string(),
            status,
            store_id: core.store_id.trim().to_string(),
        }),
        _ => Err(errors),
    }
}

/// Rules shared by both phases for the scalar variant fields.
fn check_variant_scalars(
    errors: &mut Vec<FieldError>,
    prefix: &str,
    name: &str,
    price: i64,
    quantity: i64,
    sku: &str,
) {
    let (name_min, name_max) = VARIANT_NAME_LEN;
    check(
        errors,
        format!("{prefix}.name"),
        validate_length("name", name, name_min, name_max),
    );
    check(errors, format!("{prefix}.price"), validate_price("price", price));
    check(
        errors,
        format!("{prefix}.quantity"),
        validate_stock_quantity("quantity", quantity),
    );
    check(errors, format!("{prefix}.sku"), validate_slug("sku", sku));
}

fn validate_variants(drafts: Vec<VariantDraft>) -> Result<Vec<UnlinkedVariant>, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut variants = Vec::with_capacity(drafts.len());

    for (i, draft) in drafts.into_iter().enumerate() {
        let prefix = format!("variants[{i}]");
        let before = errors.len();

        check_variant_scalars(
            &mut errors,
            &prefix,
            &draft.name,
            draft.price,
            draft.quantity,
            &draft.sku,
        );

        let color = VariantColor::from_hex(&draft.color);
        if color.is_none() {
            errors.push(FieldError::new(
                format!("{prefix}.color"),
                ValidationError::NotAllowed {
                    field: "color".to_string(),
                    allowed: VariantColor::PALETTE.iter().map(|c| c.hex().to_string()).collect(),
                },
            ));
        }

        let size = VariantSize::parse(&draft.size);
        if size.is_none() {
            errors.push(FieldError::new(
                format!("{prefix}.size"),
                ValidationError::NotAllowed {
                    field: "size".to_string(),
                    allowed: VariantSize::ALL.iter().map(|s| s.as_str().to_string()).collect(),
                },
            ));
        }

        if let (Some(color), Some(size), true) = (color, size, errors.len() == before) {
            variants.push(UnlinkedVariant {
                name: draft.name.trim().to_string(),
                color,
                size,
                price: draft.price,
                quantity: draft.quantity,
                sku: draft.sku,
            });
        }
    }

    if errors.is_empty() {
        Ok(variants)
    } else {
        Err(errors)
    }
}

fn validate_categories(drafts: Vec<CategoryDraft>) -> Result<Vec<CategoryRecord>, Vec<FieldError>> {
    if drafts.is_empty() {
        return Err(vec![FieldError::new(
            "categories",
            ValidationError::Required {
                field: "categories".to_string(),
            },
        )]);
    }

    let mut errors = Vec::new();
    let (min, max) = CATEGORY_NAME_LEN;

    for (i, draft) in drafts.iter().enumerate() {
        check(
            &mut errors,
            format!("categories[{i}].name"),
            validate_length("name", &draft.name, min, max),
        );
        check(
            &mut errors,
            format!("categories[{i}].slug"),
            validate_slug("slug", &draft.slug),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(drafts
        .into_iter()
        .map(|d| CategoryRecord {
            name: d.name.trim().to_string(),
            slug: d.slug,
        })
        .collect())
}

fn validate_tags(tags: &[TagInput]) -> Result<Vec<TagRecord>, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    let (name_min, name_max) = TAG_NAME_LEN;
    let (desc_min, desc_max) = TAG_DESCRIPTION_LEN;

    for (i, tag) in tags.iter().enumerate() {
        check(
            &mut errors,
            format!("tags[{i}].name"),
            validate_length("name", &tag.name, name_min, name_max),
        );
        check(
            &mut errors,
            format!("tags[{i}].description"),
            validate_length("description", &tag.description, desc_min, desc_max),
        );

        let key = tag.name.trim().to_lowercase();
        if !key.is_empty() && !seen.insert(key) {
            errors.push(FieldError::new(
                format!("tags[{i}].name"),
                ValidationError::Duplicate {
                    field: "tag".to_string(),
                    value: tag.name.trim().to_string(),
                },
            ));
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(tags
        .iter()
        .map(|t| TagRecord {
            name: t.name.trim().to_string(),
            description: t.description.trim().to_string(),
        })
        .collect())
}

// =============================================================================
// Phase 2
// =============================================================================

/// Stamps every variant with the generated product id and re-validates the
/// complete records.
///
/// Fails with a [`RecordSet::Variants`] error if the id is blank or any
/// variant no longer satisfies its rules.
pub fn attach_product_id(
    product_id: &str,
    variants: &[UnlinkedVariant],
) -> Result<Vec<VariantRecord>, SubmissionError> {
    let mut errors = Vec::new();
    let mut records = Vec::with_capacity(variants.len());

    for (i, variant) in variants.iter().enumerate() {
        let prefix = format!("variants[{i}]");
        check(
            &mut errors,
            format!("{prefix}.productId"),
            validate_generated_id("productId", product_id),
        );
        check_variant_scalars(
            &mut errors,
            &prefix,
            &variant.name,
            variant.price,
            variant.quantity,
            &variant.sku,
        );

        records.push(VariantRecord {
            product_id: product_id.to_string(),
            name: variant.name.clone(),
            color: variant.color,
            size: variant.size,
            price: variant.price,
            quantity: variant.quantity,
            sku: variant.sku.clone(),
        });
    }

    if errors.is_empty() {
        Ok(records)
    } else {
        Err(SubmissionError::single(RecordSet::Variants, errors))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
