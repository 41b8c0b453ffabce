//! In-memory repository implementation.
//!
//! Models the wide table as a `BTreeMap` keyed by `(PK, SK)` strings, so
//! prefix scans and cross-tenant isolation behave like the real table. Used
//! by the test suite; not intended for production.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use menuqr_core::menu::{
    Category, CategoryUpdate, Product, ProductUpdate, ProfileUpdate, UserProfile,
};
use menuqr_core::storage::{
    keys, CategoryRepository, ItemKey, ProductRepository, ProfileRepository, RepositoryError,
    Result, MAX_BATCH_DELETE,
};

#[derive(Debug, Clone)]
enum StoredItem {
    Profile(UserProfile),
    Category(Category),
    Product(Product),
}

/// In-memory wide-table repository.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    items: Arc<RwLock<BTreeMap<(String, String), StoredItem>>>,
    /// When set, `batch_delete` fails after committing this many chunks.
    fail_batch_after: Arc<Mutex<Option<usize>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `batch_delete` fail after `chunks` committed chunks.
    /// The chunks before the failure stay deleted, like a real partial
    /// batch-write failure.
    pub async fn fail_batch_delete_after(&self, chunks: usize) {
        *self.fail_batch_after.lock().await = Some(chunks);
    }

    /// Number of stored items, across all partitions.
    pub async fn item_count(&self) -> usize {
        self.items.read().await.len()
    }

    async fn scan_prefix(&self, pk: &str, sk_prefix: &str) -> Vec<StoredItem> {
        let items = self.items.read().await;
        items
            .range((pk.to_string(), sk_prefix.to_string())..)
            .take_while(|((item_pk, item_sk), _)| item_pk == pk && item_sk.starts_with(sk_prefix))
            .map(|(_, item)| item.clone())
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryRepository {
    async fn get_profile(&self, username: &str) -> Result<Option<UserProfile>> {
        let items = self.items.read().await;
        let key = (keys::user_pk(username), keys::profile_sk().to_string());
        match items.get(&key) {
            Some(StoredItem::Profile(profile)) => Ok(Some(profile.clone())),
            Some(_) => Err(RepositoryError::InvalidData(format!(
                "non-profile item under {}/{}",
                key.0, key.1
            ))),
            None => Ok(None),
        }
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (
            keys::user_pk(&profile.username),
            keys::profile_sk().to_string(),
        );
        items.insert(key, StoredItem::Profile(profile.clone()));
        Ok(())
    }

    async fn update_profile(&self, username: &str, update: &ProfileUpdate) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (keys::user_pk(username), keys::profile_sk().to_string());
        // An absent item is created with only the given fields, like an
        // unconditional UpdateItem.
        let mut profile = match items.get(&key) {
            Some(StoredItem::Profile(profile)) => profile.clone(),
            _ => UserProfile::new(username, "", "", ""),
        };
        if let Some(local_name) = &update.local_name {
            profile.local_name = local_name.clone();
        }
        if let Some(description) = &update.description {
            profile.description = Some(description.clone());
        }
        if let Some(phone_number) = &update.phone_number {
            profile.phone_number = phone_number.clone();
        }
        if let Some(social_media) = &update.social_media {
            profile.social_media = social_media.clone();
        }
        if let Some(image_url) = &update.image_url {
            profile.image_url = Some(image_url.clone());
        }
        items.insert(key, StoredItem::Profile(profile));
        Ok(())
    }

    async fn delete_profile(&self, username: &str) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(&(keys::user_pk(username), keys::profile_sk().to_string()));
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn get_category(&self, owner: &str, id: Uuid) -> Result<Option<Category>> {
        let items = self.items.read().await;
        let key = (keys::user_pk(owner), keys::category_sk(id));
        match items.get(&key) {
            Some(StoredItem::Category(category)) => Ok(Some(category.clone())),
            _ => Ok(None),
        }
    }

    async fn put_category(&self, category: &Category) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (
            keys::user_pk(&category.owner),
            keys::category_sk(category.id),
        );
        items.insert(key, StoredItem::Category(category.clone()));
        Ok(())
    }

    async fn list_categories(&self, owner: &str) -> Result<Vec<Category>> {
        let stored = self
            .scan_prefix(&keys::user_pk(owner), keys::category_sk_prefix())
            .await;
        Ok(stored
            .into_iter()
            .filter_map(|item| match item {
                StoredItem::Category(category) => Some(category),
                _ => None,
            })
            .collect())
    }

    async fn update_category(&self, owner: &str, id: Uuid, update: &CategoryUpdate) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (keys::user_pk(owner), keys::category_sk(id));
        let mut category = match items.get(&key) {
            Some(StoredItem::Category(category)) => category.clone(),
            _ => {
                let mut created = Category::new(owner, "", 0);
                created.id = id;
                created.order = None;
                created
            }
        };
        if let Some(name) = &update.category_name {
            category.name = name.clone();
        }
        if let Some(order) = update.order {
            category.order = Some(order);
        }
        items.insert(key, StoredItem::Category(category));
        Ok(())
    }

    async fn delete_category_item(&self, owner: &str, id: Uuid) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(&(keys::user_pk(owner), keys::category_sk(id)));
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn get_product(&self, owner: &str, id: Uuid) -> Result<Option<Product>> {
        let items = self.items.read().await;
        let key = (keys::user_pk(owner), keys::product_sk(id));
        match items.get(&key) {
            Some(StoredItem::Product(product)) => Ok(Some(product.clone())),
            _ => Ok(None),
        }
    }

    async fn put_product(&self, product: &Product) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (keys::user_pk(&product.owner), keys::product_sk(product.id));
        items.insert(key, StoredItem::Product(product.clone()));
        Ok(())
    }

    async fn list_products(&self, owner: &str) -> Result<Vec<Product>> {
        let stored = self
            .scan_prefix(&keys::user_pk(owner), keys::product_sk_prefix())
            .await;
        Ok(stored
            .into_iter()
            .filter_map(|item| match item {
                StoredItem::Product(product) => Some(product),
                _ => None,
            })
            .collect())
    }

    async fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>> {
        // Full scan stands in for the secondary index.
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter_map(|item| match item {
                StoredItem::Product(product) if product.category_id == category_id => {
                    Some(product.clone())
                }
                _ => None,
            })
            .collect())
    }

    async fn update_product(&self, owner: &str, id: Uuid, update: &ProductUpdate) -> Result<()> {
        let mut items = self.items.write().await;
        let key = (keys::user_pk(owner), keys::product_sk(id));
        let mut product = match items.get(&key) {
            Some(StoredItem::Product(product)) => product.clone(),
            _ => {
                let mut created = Product::new(owner, Uuid::nil(), "", 0.0, "", 0);
                created.id = id;
                created.order = None;
                created
            }
        };
        if let Some(name) = &update.product_name {
            product.name = name.clone();
        }
        if let Some(price) = update.price {
            product.price = price;
        }
        if let Some(description) = &update.description {
            product.description = description.clone();
        }
        if let Some(is_active) = update.is_active {
            product.is_active = is_active;
        }
        if let Some(order) = update.order {
            product.order = Some(order);
        }
        items.insert(key, StoredItem::Product(product));
        Ok(())
    }

    async fn delete_product(&self, owner: &str, id: Uuid) -> Result<()> {
        let mut items = self.items.write().await;
        items.remove(&(keys::user_pk(owner), keys::product_sk(id)));
        Ok(())
    }

    async fn batch_delete(&self, item_keys: &[ItemKey]) -> Result<()> {
        let fail_after = self.fail_batch_after.lock().await.take();

        for (chunk_index, chunk) in item_keys.chunks(MAX_BATCH_DELETE).enumerate() {
            if let Some(allowed) = fail_after {
                if chunk_index >= allowed {
                    return Err(RepositoryError::Unavailable(format!(
                        "batch write failed after {} of {} chunks",
                        chunk_index,
                        item_keys.len().div_ceil(MAX_BATCH_DELETE)
                    )));
                }
            }
            let mut items = self.items.write().await;
            for key in chunk {
                items.remove(&(key.pk.clone(), key.sk.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_profile_round_trip() {
        let repo = InMemoryRepository::new();
        let profile = UserProfile::new("burgers", "hash", "Burger Bar", "+1 555 0100");

        repo.put_profile(&profile).await.unwrap();
        let fetched = repo.get_profile("burgers").await.unwrap().unwrap();
        assert_eq!(fetched, profile);

        assert!(repo.get_profile("other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_profile_overwrites() {
        let repo = InMemoryRepository::new();
        repo.put_profile(&UserProfile::new("burgers", "h1", "First", "+1"))
            .await
            .unwrap();
        repo.put_profile(&UserProfile::new("burgers", "h2", "Second", "+2"))
            .await
            .unwrap();

        let fetched = repo.get_profile("burgers").await.unwrap().unwrap();
        assert_eq!(fetched.local_name, "Second");
        assert_eq!(repo.item_count().await, 1);
    }

    #[tokio::test]
    async fn test_list_categories_is_scoped_to_owner() {
        let repo = InMemoryRepository::new();
        repo.put_category(&Category::new("alice", "Drinks", 1))
            .await
            .unwrap();
        repo.put_category(&Category::new("bob", "Mains", 1))
            .await
            .unwrap();

        let listed = repo.list_categories("alice").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Drinks");
    }

    #[tokio::test]
    async fn test_category_scan_does_not_leak_products_or_profile() {
        let repo = InMemoryRepository::new();
        let category = Category::new("alice", "Drinks", 1);
        repo.put_profile(&UserProfile::new("alice", "h", "Alice's", "+1"))
            .await
            .unwrap();
        repo.put_category(&category).await.unwrap();
        repo.put_product(&Product::new("alice", category.id, "Cola", 1.5, "", 1))
            .await
            .unwrap();

        assert_eq!(repo.list_categories("alice").await.unwrap().len(), 1);
        assert_eq!(repo.list_products("alice").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_creates_absent_item() {
        let repo = InMemoryRepository::new();
        let update = CategoryUpdate {
            category_name: Some("Ghost".to_string()),
            order: None,
        };
        let id = Uuid::new_v4();
        repo.update_category("alice", id, &update).await.unwrap();

        let category = repo.get_category("alice", id).await.unwrap().unwrap();
        assert_eq!(category.name, "Ghost");
        assert_eq!(category.order, None);
    }

    #[tokio::test]
    async fn test_batch_delete_chunks_and_partial_failure() {
        let repo = InMemoryRepository::new();
        let category_id = Uuid::new_v4();
        let mut item_keys = Vec::new();
        for i in 0..40 {
            let product = Product::new("alice", category_id, format!("P{i}"), 1.0, "", 1);
            repo.put_product(&product).await.unwrap();
            item_keys.push(ItemKey::product("alice", product.id));
        }

        repo.fail_batch_delete_after(1).await;
        let err = repo.batch_delete(&item_keys).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));

        // First chunk of 25 committed, the rest survived.
        assert_eq!(repo.list_products("alice").await.unwrap().len(), 15);

        repo.batch_delete(&item_keys).await.unwrap();
        assert_eq!(repo.list_products("alice").await.unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_delete_absent_is_silent() {
        let repo = InMemoryRepository::new();
        repo.delete_product("alice", Uuid::new_v4()).await.unwrap();
        repo.delete_profile("nobody").await.unwrap();
    }
}
