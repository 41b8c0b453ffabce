use async_trait::async_trait;
use uuid::Uuid;

use crate::menu::{Category, CategoryUpdate, Product, ProductUpdate, ProfileUpdate, UserProfile};

use super::{ItemKey, Result, UploadError};

/// Repository for owner profile items.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Gets a profile by username. Absence is `Ok(None)`, not an error.
    async fn get_profile(&self, username: &str) -> Result<Option<UserProfile>>;

    /// Unconditional upsert. Re-signup with the same username silently
    /// overwrites the existing profile (documented behavior, not a bug).
    async fn put_profile(&self, profile: &UserProfile) -> Result<()>;

    /// Partial merge of the allow-listed profile fields. An absent item is
    /// implicitly created with only the given fields (no existence check).
    async fn update_profile(&self, username: &str, update: &ProfileUpdate) -> Result<()>;

    /// Deletes the profile item.
    async fn delete_profile(&self, username: &str) -> Result<()>;
}

/// Repository for category items.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Gets one category of an owner.
    async fn get_category(&self, owner: &str, id: Uuid) -> Result<Option<Category>>;

    /// Unconditional upsert of a category item.
    async fn put_category(&self, category: &Category) -> Result<()>;

    /// All categories of an owner, ordered by sort key.
    async fn list_categories(&self, owner: &str) -> Result<Vec<Category>>;

    /// Partial merge of the allow-listed category fields.
    async fn update_category(&self, owner: &str, id: Uuid, update: &CategoryUpdate) -> Result<()>;

    /// Deletes the category item only. Cascading over the referencing
    /// products is the caller's responsibility.
    async fn delete_category_item(&self, owner: &str, id: Uuid) -> Result<()>;
}

/// Repository for product items.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Gets one product of an owner.
    async fn get_product(&self, owner: &str, id: Uuid) -> Result<Option<Product>>;

    /// Unconditional upsert of a product item.
    async fn put_product(&self, product: &Product) -> Result<()>;

    /// All products of an owner, ordered by sort key.
    async fn list_products(&self, owner: &str) -> Result<Vec<Product>>;

    /// All products referencing a category, via the `categoryId` secondary
    /// index. Not scoped to an owner: the index partition is the category.
    async fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>>;

    /// Partial merge of the allow-listed product fields.
    async fn update_product(&self, owner: &str, id: Uuid, update: &ProductUpdate) -> Result<()>;

    /// Deletes a single product item.
    async fn delete_product(&self, owner: &str, id: Uuid) -> Result<()>;

    /// Deletes the given keys in chunks of at most
    /// [`MAX_BATCH_DELETE`](super::MAX_BATCH_DELETE), in order. A failed
    /// chunk surfaces as an overall failure; which earlier chunks already
    /// committed is unspecified and they are not rolled back.
    async fn batch_delete(&self, keys: &[ItemKey]) -> Result<()>;
}

/// Object store for profile images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores a byte buffer under a logical key and returns its public URL.
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> std::result::Result<String, UploadError>;
}
