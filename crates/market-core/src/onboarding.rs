//! # Seller Onboarding
//!
//! Rules for the two forms a user fills in before listing products:
//!
//! ```text
//!   Buyer ──"Become a Seller"──► SellerApplication ──► SellerDraft
//!                                                         │ (user promoted to Seller)
//!   Seller ──"Create Store"────► StoreApplication ──► StoreDraft (slug derived)
//! ```

use crate::error::{FieldError, RecordSet, SubmissionError, ValidationError};
use crate::slug::unique_slug;
use crate::submission::{SellerApplication, StoreApplication};
use crate::types::SellerActor;
use crate::validation::{
    validate_length, validate_optional_url, validate_phone_number, validate_slug,
    validate_stripe_account_id,
};

const BUSINESS_NAME_LEN: (usize, usize) = (3, 100);
const STORE_NAME_LEN: (usize, usize) = (3, 100);
const STORE_DESCRIPTION_MAX: usize = 250;

/// A seller row ready for insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerDraft {
    pub user_id: String,
    pub business_name: String,
    pub phone_number: String,
    pub stripe_account_id: String,
    pub agreed_to_terms: bool,
}

/// A store row ready for insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreDraft {
    pub seller_id: String,
    pub store_name: String,
    pub store_description: Option<String>,
    pub slug: String,
    pub logo_image: Option<String>,
    pub cover_image: Option<String>,
    pub is_active: bool,
}

fn push(errors: &mut Vec<FieldError>, path: &str, result: Result<(), ValidationError>) {
    if let Err(e) = result {
        errors.push(FieldError::new(path, e));
    }
}

/// Treats `Some("")` and whitespace as "not provided".
fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Validates the "Become a Seller" form for `user_id`.
pub fn prepare_seller(
    user_id: &str,
    application: &SellerApplication,
) -> Result<SellerDraft, SubmissionError> {
    let mut errors = Vec::new();
    let (min, max) = BUSINESS_NAME_LEN;

    push(
        &mut errors,
        "businessName",
        validate_length("businessName", &application.business_name, min, max),
    );
    push(
        &mut errors,
        "phoneNumber",
        validate_phone_number("phoneNumber", &application.phone_number),
    );
    push(
        &mut errors,
        "stripeAccountId",
        validate_stripe_account_id("stripeAccountId", &application.stripe_account_id),
    );
    if !application.agreed_to_terms {
        errors.push(FieldError::new(
            "agreedToTerms",
            ValidationError::MustAccept {
                field: "agreedToTerms".to_string(),
            },
        ));
    }

    if !errors.is_empty() {
        return Err(SubmissionError::single(RecordSet::Seller, errors));
    }

    Ok(SellerDraft {
        user_id: user_id.to_string(),
        business_name: application.business_name.trim().to_string(),
        phone_number: application.phone_number.trim().to_string(),
        stripe_account_id: application.stripe_account_id.trim().to_string(),
        agreed_to_terms: true,
    })
}

/// Validates the "Create Store" form and derives the store slug.
pub fn prepare_store(
    actor: &SellerActor,
    application: &StoreApplication,
) -> Result<StoreDraft, SubmissionError> {
    let mut errors = Vec::new();
    let (min, max) = STORE_NAME_LEN;

    push(
        &mut errors,
        "storeName",
        validate_length("storeName", &application.store_name, min, max),
    );
    if let Some(description) = &application.store_description {
        push(
            &mut errors,
            "storeDescription",
            validate_length("storeDescription", description, 0, STORE_DESCRIPTION_MAX),
        );
    }
    push(
        &mut errors,
        "logoImage",
        validate_optional_url("logoImage", application.logo_image.as_deref()),
    );
    push(
        &mut errors,
        "coverImage",
        validate_optional_url("coverImage", application.cover_image.as_deref()),
    );

    let slug = unique_slug(&application.store_name);
    if errors.is_empty() {
        push(&mut errors, "slug", validate_slug("slug", &slug));
    }

    if !errors.is_empty() {
        return Err(SubmissionError::single(RecordSet::Store, errors));
    }

    Ok(StoreDraft {
        seller_id: actor.seller_id.clone(),
        store_name: application.store_name.trim().to_string(),
        store_description: non_blank(application.store_description.as_ref()),
        slug,
        logo_image: non_blank(application.logo_image.as_ref()),
        cover_image: non_blank(application.cover_image.as_ref()),
        is_active: application.is_active,
    })
}
