//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! domain types. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use menuqr_core::menu::{Category, Product, UserProfile};
use menuqr_core::storage::{keys, RepositoryError};

pub const ENTITY_TYPE_PROFILE: &str = "PROFILE";
pub const ENTITY_TYPE_CATEGORY: &str = "CATEGORY";
pub const ENTITY_TYPE_PRODUCT: &str = "PRODUCT";

// ============================================================================
// Profile conversions
// ============================================================================

/// Convert a UserProfile to a DynamoDB item.
pub fn profile_to_item(profile: &UserProfile) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::user_pk(&profile.username)),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::profile_sk().to_string()),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_PROFILE.to_string()),
    );

    // Data
    item.insert(
        "username".to_string(),
        AttributeValue::S(profile.username.clone()),
    );
    item.insert(
        "passwordHash".to_string(),
        AttributeValue::S(profile.password_hash.clone()),
    );
    item.insert(
        "localName".to_string(),
        AttributeValue::S(profile.local_name.clone()),
    );
    if let Some(description) = &profile.description {
        item.insert(
            "description".to_string(),
            AttributeValue::S(description.clone()),
        );
    }
    item.insert(
        "phoneNumber".to_string(),
        AttributeValue::S(profile.phone_number.clone()),
    );
    item.insert(
        "socialMedia".to_string(),
        AttributeValue::L(
            profile
                .social_media
                .iter()
                .map(|link| AttributeValue::S(link.clone()))
                .collect(),
        ),
    );
    if let Some(image_url) = &profile.image_url {
        item.insert("imageUrl".to_string(), AttributeValue::S(image_url.clone()));
    }

    item
}

/// Convert a DynamoDB item to a UserProfile.
pub fn item_to_profile(
    item: &HashMap<String, AttributeValue>,
) -> Result<UserProfile, RepositoryError> {
    Ok(UserProfile {
        username: get_string(item, "username")?,
        password_hash: get_string(item, "passwordHash")?,
        local_name: get_string(item, "localName")?,
        description: get_optional_string(item, "description"),
        phone_number: get_string(item, "phoneNumber")?,
        social_media: get_string_list(item, "socialMedia"),
        image_url: get_optional_string(item, "imageUrl"),
    })
}

// ============================================================================
// Category conversions
// ============================================================================

/// Convert a Category to a DynamoDB item.
pub fn category_to_item(category: &Category) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::user_pk(&category.owner)),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::category_sk(category.id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_CATEGORY.to_string()),
    );

    // Data
    item.insert(
        "categoryName".to_string(),
        AttributeValue::S(category.name.clone()),
    );
    if let Some(order) = category.order {
        item.insert("order".to_string(), AttributeValue::N(order.to_string()));
    }
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(category.created_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to a Category. Owner and ID come from the keys.
pub fn item_to_category(
    item: &HashMap<String, AttributeValue>,
) -> Result<Category, RepositoryError> {
    Ok(Category {
        id: id_from_sk_attr(item)?,
        owner: owner_from_pk_attr(item)?,
        name: get_string(item, "categoryName")?,
        order: get_optional_u32(item, "order")?,
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Product conversions
// ============================================================================

/// Convert a Product to a DynamoDB item.
///
/// The `categoryId` attribute carries the full `CATEGORY#<uuid>` value so it
/// doubles as the secondary-index partition key.
pub fn product_to_item(product: &Product) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::user_pk(&product.owner)),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::product_sk(product.id)),
    );
    item.insert(
        "categoryId".to_string(),
        AttributeValue::S(keys::category_index_value(product.category_id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_PRODUCT.to_string()),
    );

    // Data
    item.insert(
        "productName".to_string(),
        AttributeValue::S(product.name.clone()),
    );
    item.insert(
        "price".to_string(),
        AttributeValue::N(product.price.to_string()),
    );
    item.insert(
        "description".to_string(),
        AttributeValue::S(product.description.clone()),
    );
    item.insert(
        "isActive".to_string(),
        AttributeValue::Bool(product.is_active),
    );
    if let Some(order) = product.order {
        item.insert("order".to_string(), AttributeValue::N(order.to_string()));
    }
    item.insert(
        "createdAt".to_string(),
        AttributeValue::S(product.created_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to a Product.
pub fn item_to_product(
    item: &HashMap<String, AttributeValue>,
) -> Result<Product, RepositoryError> {
    let category_value = get_string(item, "categoryId")?;
    let category_id = keys::id_from_sk(&category_value).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Invalid categoryId: {category_value}"))
    })?;

    Ok(Product {
        id: id_from_sk_attr(item)?,
        owner: owner_from_pk_attr(item)?,
        category_id,
        name: get_string(item, "productName")?,
        price: get_f64(item, "price")?,
        description: get_string(item, "description")?,
        is_active: get_bool(item, "isActive")?,
        order: get_optional_u32(item, "order")?,
        created_at: get_datetime(item, "createdAt")?,
    })
}

// ============================================================================
// Attribute helpers
// ============================================================================

fn owner_from_pk_attr(item: &HashMap<String, AttributeValue>) -> Result<String, RepositoryError> {
    let pk = get_string(item, "PK")?;
    pk.strip_prefix(keys::USER_PREFIX)
        .map(|owner| owner.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid PK: {pk}")))
}

fn id_from_sk_attr(item: &HashMap<String, AttributeValue>) -> Result<Uuid, RepositoryError> {
    let sk = get_string(item, "SK")?;
    keys::id_from_sk(&sk).ok_or_else(|| RepositoryError::InvalidData(format!("Invalid SK: {sk}")))
}

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &HashMap<String, AttributeValue>, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a string-list attribute, defaulting to empty.
fn get_string_list(item: &HashMap<String, AttributeValue>, key: &str) -> Vec<String> {
    item.get(key)
        .and_then(|v| v.as_l().ok())
        .map(|list| {
            list.iter()
                .filter_map(|v| v.as_s().ok())
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Get a required numeric attribute as f64.
fn get_f64(item: &HashMap<String, AttributeValue>, key: &str) -> Result<f64, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional numeric attribute as u32.
fn get_optional_u32(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<u32>, RepositoryError> {
    match item.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_n()
            .ok()
            .and_then(|n| n.parse().ok())
            .map(Some)
            .ok_or_else(|| RepositoryError::InvalidData(format!("Invalid number: {}", key))),
    }
}

/// Get a required boolean attribute.
fn get_bool(item: &HashMap<String, AttributeValue>, key: &str) -> Result<bool, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
