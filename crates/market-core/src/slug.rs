//! # Slugs and SKUs
//!
//! Store slugs, category slugs and variant SKUs all share one shape:
//!
//! ```text
//!   "Red M" + "m" + "#000000"
//!        │
//!        ▼  slugify (lowercase, ASCII only, hyphen separated)
//!   "red-m-m-000000"
//!        │
//!        ▼  + "-" + 6 random [a-z0-9]
//!   "red-m-m-000000-k3x9qa"
//! ```
//!
//! The suffix makes collisions unlikely, not impossible. A collision shows up
//! as a unique-constraint failure on insert.

use rand::Rng;

use crate::{MAX_SLUG_LEN, SLUG_SUFFIX_LEN};

const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Lowercases and reduces `text` to ASCII alphanumerics joined by single
/// hyphens. Characters outside ASCII are dropped.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    out
}

/// Six random lowercase alphanumerics.
pub fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..SLUG_SUFFIX_LEN)
        .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
        .collect()
}

/// `slugify(base)` followed by `-` and a fresh random suffix.
///
/// Long bases are cut back to a segment boundary so the result never exceeds
/// [`MAX_SLUG_LEN`]. A base that slugifies to nothing yields `-xxxxxx`, which
/// [`is_valid_slug`] rejects.
pub fn unique_slug(base: &str) -> String {
    let slug = slugify(base);
    format!("{}-{}", truncate_base(&slug), random_suffix())
}

/// Longest prefix of `slug` that leaves room for `-` plus the suffix,
/// preferring to end on a whole segment.
fn truncate_base(slug: &str) -> &str {
    let limit = MAX_SLUG_LEN - SLUG_SUFFIX_LEN - 1;
    if slug.len() <= limit {
        return slug;
    }

    // slugify output is ASCII, so byte offsets are char boundaries.
    if slug.as_bytes()[limit] == b'-' {
        return &slug[..limit];
    }
    match slug[..limit].rfind('-') {
        Some(cut) => &slug[..cut],
        None => &slug[..limit],
    }
}

/// Checks the stored slug shape: lowercase ASCII segments joined by single
/// hyphens, ending in a suffix segment of [`SLUG_SUFFIX_LEN`] characters.
pub fn is_valid_slug(slug: &str) -> bool {
    if slug.is_empty() || slug.len() > MAX_SLUG_LEN {
        return false;
    }

    let segments: Vec<&str> = slug.split('-').collect();
    if segments.len() < 2 {
        return false;
    }

    let well_formed = segments.iter().all(|seg| {
        !seg.is_empty()
            && seg
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    });

    well_formed && segments.last().map(|s| s.len()) == Some(SLUG_SUFFIX_LEN)
}
