//! In-memory joins of categories and products into menu views.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ordering, Category, Product, ProfileView};

/// A category with its products, as returned to the owner. Carries every
/// stored field, inactive products included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

/// The owner's full menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerMenu {
    pub categories: Vec<CategoryWithProducts>,
}

/// Public projection of one product. Ownership, ordering internals and the
/// active flag are stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProduct {
    pub product_id: Uuid,
    pub product_name: String,
    pub price: f64,
    pub description: String,
}

impl From<&Product> for PublicProduct {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            price: product.price,
            description: product.description.clone(),
        }
    }
}

/// Public projection of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicCategory {
    pub category_id: Uuid,
    pub category_name: String,
    pub products: Vec<PublicProduct>,
}

/// The diner-facing menu of one restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMenu {
    pub profile: ProfileView,
    pub categories: Vec<PublicCategory>,
}

/// Joins an owner's categories and products in memory.
///
/// Every product joins through its `category_id`; products referencing a
/// category that no longer exists (orphans from a partial cascade delete)
/// are dropped from the view. Both levels come out sorted by display order.
pub fn owner_menu(mut categories: Vec<Category>, products: Vec<Product>) -> OwnerMenu {
    ordering::sort_categories(&mut categories);

    let categories = categories
        .into_iter()
        .map(|category| {
            let mut matching: Vec<Product> = products
                .iter()
                .filter(|p| p.category_id == category.id)
                .cloned()
                .collect();
            ordering::sort_products(&mut matching);
            CategoryWithProducts {
                category,
                products: matching,
            }
        })
        .collect();

    OwnerMenu { categories }
}

/// Builds the diner-facing menu: inactive products are hidden, and only the
/// public fields of each product survive the projection.
pub fn public_menu(
    profile: ProfileView,
    mut categories: Vec<Category>,
    products_by_category: impl Fn(Uuid) -> Vec<Product>,
) -> PublicMenu {
    ordering::sort_categories(&mut categories);

    let categories = categories
        .into_iter()
        .map(|category| {
            let mut products = products_by_category(category.id);
            ordering::sort_products(&mut products);
            PublicCategory {
                category_id: category.id,
                category_name: category.name,
                products: products
                    .iter()
                    .filter(|p| p.is_active)
                    .map(PublicProduct::from)
                    .collect(),
            }
        })
        .collect();

    PublicMenu {
        profile,
        categories,
    }
}
