use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::MenuError;

/// Payload for creating an owner account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub local_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub social_media: Vec<String>,
}

impl SignupRequest {
    /// Checks the fields a signup must carry. Uniqueness of the username is
    /// deliberately not checked here; see `put_profile`.
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.username.trim().is_empty() {
            return Err(MenuError::Validation("username is required".to_string()));
        }
        if self.username.contains('#') {
            return Err(MenuError::Validation(
                "username must not contain '#'".to_string(),
            ));
        }
        if self.password.len() < 8 {
            return Err(MenuError::Validation(
                "password must be at least 8 characters".to_string(),
            ));
        }
        if self.local_name.trim().is_empty() {
            return Err(MenuError::Validation("localName is required".to_string()));
        }
        Ok(())
    }
}

/// Payload for logging in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub category_name: String,
}

impl CreateCategoryRequest {
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.category_name.trim().is_empty() {
            return Err(MenuError::Validation(
                "categoryName is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Payload for creating a product under an existing category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub category_id: Uuid,
    pub product_name: String,
    pub price: f64,
    pub description: String,
}

impl CreateProductRequest {
    pub fn validate(&self) -> Result<(), MenuError> {
        if self.product_name.trim().is_empty() {
            return Err(MenuError::Validation("productName is required".to_string()));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(MenuError::Validation(
                "price must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Allow-listed partial update of a profile. Fields left `None` are untouched.
///
/// The username and password hash are never writable through this path;
/// credentials change through dedicated flows.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub local_name: Option<String>,
    pub description: Option<String>,
    pub phone_number: Option<String>,
    pub social_media: Option<Vec<String>>,
    pub image_url: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.local_name.is_none()
            && self.description.is_none()
            && self.phone_number.is_none()
            && self.social_media.is_none()
            && self.image_url.is_none()
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self {
            image_url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Allow-listed partial update of a category.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub category_name: Option<String>,
    pub order: Option<u32>,
}

impl CategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.category_name.is_none() && self.order.is_none()
    }

    pub fn order(order: u32) -> Self {
        Self {
            category_name: None,
            order: Some(order),
        }
    }
}

/// Allow-listed partial update of a product. The owning category cannot be
/// changed after creation.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub product_name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub order: Option<u32>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
            && self.order.is_none()
    }

    pub fn order(order: u32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), MenuError> {
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(MenuError::Validation(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }
        if let Some(name) = &self.product_name {
            if name.trim().is_empty() {
                return Err(MenuError::Validation(
                    "productName must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// One entry of a reorder request: an item and its new position.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderEntry {
    pub id: Uuid,
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_rejects_short_password() {
        let request = SignupRequest {
            username: "burgers".to_string(),
            password: "short".to_string(),
            local_name: "Burger Bar".to_string(),
            phone_number: "+1 555 0100".to_string(),
            description: None,
            social_media: vec![],
        };
        assert!(matches!(
            request.validate(),
            Err(MenuError::Validation(_))
        ));
    }

    #[test]
    fn test_signup_rejects_hash_in_username() {
        let request = SignupRequest {
            username: "bur#gers".to_string(),
            password: "longenough".to_string(),
            local_name: "Burger Bar".to_string(),
            phone_number: "+1 555 0100".to_string(),
            description: None,
            social_media: vec![],
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_product_update_rejects_nan_price() {
        let update = ProductUpdate {
            price: Some(f64::NAN),
            ..ProductUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_empty_updates() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(CategoryUpdate::default().is_empty());
        assert!(!CategoryUpdate::order(2).is_empty());
        assert!(!ProductUpdate::active(false).is_empty());
    }

    #[test]
    fn test_create_product_accepts_zero_price() {
        let request = CreateProductRequest {
            category_id: Uuid::new_v4(),
            product_name: "Tap water".to_string(),
            price: 0.0,
            description: "On the house".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_camel_case_deserialization() {
        let json = r#"{"categoryId":"4f2c9a60-0000-4000-8000-000000000000","productName":"Cola","price":1.5,"description":"33cl"}"#;
        let request: CreateProductRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.product_name, "Cola");
    }
}
