//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `menuqr_core::storage` using a
//! single wide table plus the `categoryId-index` secondary index.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use crate::config::Config;

use menuqr_core::menu::{
    Category, CategoryUpdate, Product, ProductUpdate, ProfileUpdate, UserProfile,
};
use menuqr_core::storage::{
    keys, CategoryRepository, ItemKey, ProductRepository, ProfileRepository, RepositoryError,
    Result, MAX_BATCH_DELETE,
};

use super::conversions::{
    category_to_item, item_to_category, item_to_product, item_to_profile, product_to_item,
    profile_to_item,
};
use super::error::{
    map_batch_write_error, map_delete_item_error, map_get_item_error, map_put_item_error,
    map_query_error, map_update_item_error,
};

/// Name of the secondary index keyed on the `categoryId` attribute.
pub const CATEGORY_INDEX: &str = "categoryId-index";

/// DynamoDB-based repository implementation.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a repository from the application configuration and a shared
    /// SDK config (credential chain resolved once by the caller).
    pub fn from_config(sdk_config: &aws_config::SdkConfig, config: &Config) -> Self {
        Self::new(Client::new(sdk_config), config.table_name.clone())
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn get_item(
        &self,
        key: ItemKey,
    ) -> Result<Option<std::collections::HashMap<String, AttributeValue>>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(key.pk))
            .key("SK", AttributeValue::S(key.sk))
            .send()
            .await
            .map_err(map_get_item_error)?;

        Ok(result.item)
    }

    async fn query_prefix(
        &self,
        pk: String,
        sk_prefix: &str,
    ) -> Result<Vec<std::collections::HashMap<String, AttributeValue>>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(pk))
            .expression_attribute_values(":prefix", AttributeValue::S(sk_prefix.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        Ok(result.items.unwrap_or_default())
    }

    /// Unconditional partial merge. Creates the item when absent; attribute
    /// names go through placeholders because `order` is a reserved word.
    async fn update_item(&self, key: ItemKey, updates: Vec<(&'static str, AttributeValue)>) -> Result<()> {
        if updates.is_empty() {
            return Ok(());
        }

        let mut request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(key.pk))
            .key("SK", AttributeValue::S(key.sk));

        let mut clauses = Vec::with_capacity(updates.len());
        for (i, (attr, value)) in updates.into_iter().enumerate() {
            let name = format!("#a{i}");
            let placeholder = format!(":v{i}");
            clauses.push(format!("{name} = {placeholder}"));
            request = request
                .expression_attribute_names(name, attr)
                .expression_attribute_values(placeholder, value);
        }

        request
            .update_expression(format!("SET {}", clauses.join(", ")))
            .send()
            .await
            .map_err(map_update_item_error)?;

        Ok(())
    }

    async fn delete_item(&self, key: ItemKey) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(key.pk))
            .key("SK", AttributeValue::S(key.sk))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}

// ============================================================================
// ProfileRepository implementation
// ============================================================================

#[async_trait]
impl ProfileRepository for DynamoDbRepository {
    async fn get_profile(&self, username: &str) -> Result<Option<UserProfile>> {
        match self.get_item(ItemKey::profile(username)).await? {
            Some(item) => Ok(Some(item_to_profile(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_profile(&self, profile: &UserProfile) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(profile_to_item(profile)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn update_profile(&self, username: &str, update: &ProfileUpdate) -> Result<()> {
        let mut updates: Vec<(&'static str, AttributeValue)> = Vec::new();
        if let Some(local_name) = &update.local_name {
            updates.push(("localName", AttributeValue::S(local_name.clone())));
        }
        if let Some(description) = &update.description {
            updates.push(("description", AttributeValue::S(description.clone())));
        }
        if let Some(phone_number) = &update.phone_number {
            updates.push(("phoneNumber", AttributeValue::S(phone_number.clone())));
        }
        if let Some(social_media) = &update.social_media {
            updates.push((
                "socialMedia",
                AttributeValue::L(
                    social_media
                        .iter()
                        .map(|link| AttributeValue::S(link.clone()))
                        .collect(),
                ),
            ));
        }
        if let Some(image_url) = &update.image_url {
            updates.push(("imageUrl", AttributeValue::S(image_url.clone())));
        }

        self.update_item(ItemKey::profile(username), updates).await
    }

    async fn delete_profile(&self, username: &str) -> Result<()> {
        self.delete_item(ItemKey::profile(username)).await
    }
}

// ============================================================================
// CategoryRepository implementation
// ============================================================================

#[async_trait]
impl CategoryRepository for DynamoDbRepository {
    async fn get_category(&self, owner: &str, id: Uuid) -> Result<Option<Category>> {
        match self.get_item(ItemKey::category(owner, id)).await? {
            Some(item) => Ok(Some(item_to_category(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_category(&self, category: &Category) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(category_to_item(category)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn list_categories(&self, owner: &str) -> Result<Vec<Category>> {
        let items = self
            .query_prefix(keys::user_pk(owner), keys::category_sk_prefix())
            .await?;
        items.iter().map(item_to_category).collect()
    }

    async fn update_category(&self, owner: &str, id: Uuid, update: &CategoryUpdate) -> Result<()> {
        let mut updates: Vec<(&'static str, AttributeValue)> = Vec::new();
        if let Some(name) = &update.category_name {
            updates.push(("categoryName", AttributeValue::S(name.clone())));
        }
        if let Some(order) = update.order {
            updates.push(("order", AttributeValue::N(order.to_string())));
        }

        self.update_item(ItemKey::category(owner, id), updates).await
    }

    async fn delete_category_item(&self, owner: &str, id: Uuid) -> Result<()> {
        self.delete_item(ItemKey::category(owner, id)).await
    }
}

// ============================================================================
// ProductRepository implementation
// ============================================================================

#[async_trait]
impl ProductRepository for DynamoDbRepository {
    async fn get_product(&self, owner: &str, id: Uuid) -> Result<Option<Product>> {
        match self.get_item(ItemKey::product(owner, id)).await? {
            Some(item) => Ok(Some(item_to_product(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_product(&self, product: &Product) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(product_to_item(product)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn list_products(&self, owner: &str) -> Result<Vec<Product>> {
        let items = self
            .query_prefix(keys::user_pk(owner), keys::product_sk_prefix())
            .await?;
        items.iter().map(item_to_product).collect()
    }

    async fn list_products_by_category(&self, category_id: Uuid) -> Result<Vec<Product>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(CATEGORY_INDEX)
            .key_condition_expression("categoryId = :cid")
            .expression_attribute_values(
                ":cid",
                AttributeValue::S(keys::category_index_value(category_id)),
            )
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_product).collect()
    }

    async fn update_product(&self, owner: &str, id: Uuid, update: &ProductUpdate) -> Result<()> {
        let mut updates: Vec<(&'static str, AttributeValue)> = Vec::new();
        if let Some(name) = &update.product_name {
            updates.push(("productName", AttributeValue::S(name.clone())));
        }
        if let Some(price) = update.price {
            updates.push(("price", AttributeValue::N(price.to_string())));
        }
        if let Some(description) = &update.description {
            updates.push(("description", AttributeValue::S(description.clone())));
        }
        if let Some(is_active) = update.is_active {
            updates.push(("isActive", AttributeValue::Bool(is_active)));
        }
        if let Some(order) = update.order {
            updates.push(("order", AttributeValue::N(order.to_string())));
        }

        self.update_item(ItemKey::product(owner, id), updates).await
    }

    async fn delete_product(&self, owner: &str, id: Uuid) -> Result<()> {
        self.delete_item(ItemKey::product(owner, id)).await
    }

    async fn batch_delete(&self, item_keys: &[ItemKey]) -> Result<()> {
        for chunk in item_keys.chunks(MAX_BATCH_DELETE) {
            let requests: Vec<WriteRequest> = chunk
                .iter()
                .map(|key| {
                    let delete = DeleteRequest::builder()
                        .key("PK", AttributeValue::S(key.pk.clone()))
                        .key("SK", AttributeValue::S(key.sk.clone()))
                        .build()
                        .map_err(|e| {
                            RepositoryError::Serialization(format!("DeleteRequest: {e}"))
                        })?;
                    Ok(WriteRequest::builder().delete_request(delete).build())
                })
                .collect::<Result<_>>()?;

            let result = self
                .client
                .batch_write_item()
                .request_items(&self.table_name, requests)
                .send()
                .await
                .map_err(map_batch_write_error)?;

            // Unprocessed keys are not retried; the caller decides how to
            // surface the partial outcome.
            if let Some(unprocessed) = result.unprocessed_items {
                let leftover: usize = unprocessed.values().map(Vec::len).sum();
                if leftover > 0 {
                    return Err(RepositoryError::Unavailable(format!(
                        "batch write left {leftover} unprocessed deletes"
                    )));
                }
            }
        }

        Ok(())
    }
}
