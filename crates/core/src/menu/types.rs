use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An owner's restaurant profile.
///
/// One item per owner under the `PROFILE` sort key. The password hash never
/// leaves the backend; public reads go through [`ProfileView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub username: String,
    pub password_hash: String,
    /// Display name of the restaurant ("local" in the original sense of venue).
    pub local_name: String,
    pub description: Option<String>,
    pub phone_number: String,
    /// Social links, stored as plain URLs.
    pub social_media: Vec<String>,
    /// Public URL of the uploaded profile image, if any.
    pub image_url: Option<String>,
}

impl UserProfile {
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        local_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            local_name: local_name.into(),
            description: None,
            phone_number: phone_number.into(),
            social_media: Vec::new(),
            image_url: None,
        }
    }

    /// Sets the description for this profile.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the social links for this profile.
    pub fn with_social_media(mut self, links: Vec<String>) -> Self {
        self.social_media = links;
        self
    }

    /// Strips the credential fields for external consumption.
    pub fn view(&self) -> ProfileView {
        ProfileView {
            username: self.username.clone(),
            local_name: self.local_name.clone(),
            description: self.description.clone(),
            phone_number: self.phone_number.clone(),
            social_media: self.social_media.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Publicly visible slice of a profile. No password hash, ever.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    pub username: String,
    pub local_name: String,
    pub description: Option<String>,
    pub phone_number: String,
    pub social_media: Vec<String>,
    pub image_url: Option<String>,
}

/// A menu category owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    /// Username of the owning user (the partition).
    pub owner: String,
    #[serde(rename = "categoryName")]
    pub name: String,
    /// Display sequence, assigned as sibling-count + 1 at creation.
    /// Absent on items created before ordering existed.
    pub order: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(owner: impl Into<String>, name: impl Into<String>, order: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            name: name.into(),
            order: Some(order),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this category (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

/// A product that lives under exactly one category of the same owner.
///
/// The `category_id` reference is not enforced by the store; an orphaned
/// product is possible after a partially failed cascade delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub owner: String,
    pub category_id: Uuid,
    #[serde(rename = "productName")]
    pub name: String,
    pub price: f64,
    pub description: String,
    pub is_active: bool,
    pub order: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        owner: impl Into<String>,
        category_id: Uuid,
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        order: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner: owner.into(),
            category_id,
            name: name.into(),
            price,
            description: description.into(),
            is_active: true,
            order: Some(order),
            created_at: Utc::now(),
        }
    }

    /// Sets a specific ID for this product (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_builder() {
        let profile = UserProfile::new("burgers", "$argon2id$...", "Burger Bar", "+598 99 123 456")
            .with_description("Smash burgers")
            .with_social_media(vec!["https://instagram.com/burgerbar".to_string()]);

        assert_eq!(profile.username, "burgers");
        assert_eq!(profile.local_name, "Burger Bar");
        assert_eq!(profile.description, Some("Smash burgers".to_string()));
        assert_eq!(profile.social_media.len(), 1);
        assert!(profile.image_url.is_none());
    }

    #[test]
    fn test_profile_view_omits_password_hash() {
        let profile = UserProfile::new("burgers", "$argon2id$secret", "Burger Bar", "+1 555 0100");
        let view = profile.view();

        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("secret"));
        assert!(json.contains("Burger Bar"));
    }

    #[test]
    fn test_category_new_assigns_order() {
        let category = Category::new("burgers", "Drinks", 3);
        assert_eq!(category.owner, "burgers");
        assert_eq!(category.name, "Drinks");
        assert_eq!(category.order, Some(3));
    }

    #[test]
    fn test_product_defaults_to_active() {
        let product = Product::new("burgers", Uuid::new_v4(), "Cola", 1.5, "33cl can", 1);
        assert!(product.is_active);
        assert_eq!(product.order, Some(1));
    }

    #[test]
    fn test_product_wire_names_match_table_attributes() {
        let product = Product::new("burgers", Uuid::new_v4(), "Cola", 1.5, "33cl can", 1);
        let json = serde_json::to_string(&product).unwrap();
        assert!(json.contains("\"productName\":\"Cola\""));
        assert!(json.contains("\"categoryId\""));
        assert!(json.contains("\"isActive\""));
    }
}
