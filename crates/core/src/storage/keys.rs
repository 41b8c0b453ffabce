//! Single-table key generation functions.
//!
//! Pure functions for generating partition and sort keys following the
//! single-table design. All functions are sync and have no side effects;
//! callers never construct keys by hand anywhere else.

use uuid::Uuid;

// ============================================================================
// Key prefixes
// ============================================================================

pub const USER_PREFIX: &str = "USER#";
pub const CATEGORY_PREFIX: &str = "CATEGORY#";
pub const PRODUCT_PREFIX: &str = "PRODUCT#";

/// Sort key shared by every profile item.
pub const PROFILE_SK: &str = "PROFILE";

// ============================================================================
// Owner keys
// ============================================================================

/// Generate the partition key for an owner.
///
/// Pattern: `USER#<username>`
pub fn user_pk(username: &str) -> String {
    format!("{USER_PREFIX}{username}")
}

/// Sort key for an owner's profile item.
///
/// Pattern: `PROFILE` (a single fixed item per partition)
pub fn profile_sk() -> &'static str {
    PROFILE_SK
}

// ============================================================================
// Category keys
// ============================================================================

/// Generate the sort key for a category.
///
/// Pattern: `CATEGORY#<category_id>`
pub fn category_sk(category_id: Uuid) -> String {
    format!("{CATEGORY_PREFIX}{category_id}")
}

/// Sort-key prefix for querying all categories of an owner.
pub fn category_sk_prefix() -> &'static str {
    CATEGORY_PREFIX
}

// ============================================================================
// Product keys
// ============================================================================

/// Generate the sort key for a product.
///
/// Pattern: `PRODUCT#<product_id>`
pub fn product_sk(product_id: Uuid) -> String {
    format!("{PRODUCT_PREFIX}{product_id}")
}

/// Sort-key prefix for querying all products of an owner.
pub fn product_sk_prefix() -> &'static str {
    PRODUCT_PREFIX
}

/// Value stored in a product's `categoryId` attribute and used as the
/// partition key of the `categoryId-index` secondary index.
///
/// Pattern: `CATEGORY#<category_id>` (identical to the category's sort key,
/// which is what makes the index join work)
pub fn category_index_value(category_id: Uuid) -> String {
    category_sk(category_id)
}

/// Extract the entity ID from a category or product sort key.
///
/// Inverse of [`category_sk`] / [`product_sk`]; returns `None` for keys that
/// carry no UUID segment (for example `PROFILE`).
pub fn id_from_sk(sk: &str) -> Option<Uuid> {
    sk.split_once('#')
        .and_then(|(_, id)| Uuid::parse_str(id).ok())
}
