//! Menu operations over the repository traits.
//!
//! Multi-item mutations run as sequential independent writes; there are no
//! transactions. A failure part-way leaves earlier writes committed and
//! surfaces as [`MenuError::PartialMutation`].

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use menuqr_core::auth::{AuthError, PasswordHasher, TokenService};
use menuqr_core::menu::{
    ordering, projection, Category, CategoryUpdate, CreateCategoryRequest, CreateProductRequest,
    LoginRequest, MenuError, Product, ProductUpdate, ProfileUpdate, ProfileView, ReorderEntry,
    SignupRequest, UserProfile,
};
use menuqr_core::menu::projection::{OwnerMenu, PublicMenu};
use menuqr_core::storage::{
    CategoryRepository, ItemKey, ObjectStore, ProductRepository, ProfileRepository,
};

/// The application service: owner accounts, menu management and the public
/// menu view.
pub struct MenuService<R> {
    repo: Arc<R>,
    tokens: Arc<dyn TokenService>,
    passwords: Arc<dyn PasswordHasher>,
    objects: Arc<dyn ObjectStore>,
}

impl<R> MenuService<R>
where
    R: ProfileRepository + CategoryRepository + ProductRepository,
{
    pub fn new(
        repo: Arc<R>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordHasher>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            repo,
            tokens,
            passwords,
            objects,
        }
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates an owner account. Signing up again with an existing username
    /// silently overwrites the previous profile; the write is an upsert.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn signup(&self, request: SignupRequest) -> Result<ProfileView, MenuError> {
        request.validate()?;

        let password_hash = self
            .passwords
            .hash(&request.password)
            .map_err(|e| MenuError::Storage(e.to_string()))?;

        let mut profile = UserProfile::new(
            request.username.as_str(),
            password_hash,
            request.local_name.as_str(),
            request.phone_number.as_str(),
        )
        .with_social_media(request.social_media);
        profile.description = request.description;

        self.repo.put_profile(&profile).await?;
        debug!("profile created");
        Ok(profile.view())
    }

    /// Verifies credentials and returns a signed access token.
    ///
    /// An unknown username and a bad password answer identically, so the
    /// login endpoint does not leak which usernames exist.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> Result<String, MenuError> {
        let profile = self
            .repo
            .get_profile(&request.username)
            .await?
            .ok_or_else(|| MenuError::Unauthorized("bad credentials".to_string()))?;

        let valid = self
            .passwords
            .verify(&request.password, &profile.password_hash)
            .map_err(|e| MenuError::Storage(e.to_string()))?;
        if !valid {
            warn!("password verification failed");
            return Err(MenuError::Unauthorized("bad credentials".to_string()));
        }

        self.tokens
            .issue(&profile.username)
            .map_err(|e| MenuError::Storage(e.to_string()))
    }

    /// Verifies an access token and returns the authenticated username.
    pub fn authenticate(&self, token: &str) -> Result<String, MenuError> {
        let claims = self.tokens.verify(token).map_err(|e| match e {
            AuthError::TokenExpired => MenuError::Unauthorized("token expired".to_string()),
            e => MenuError::Unauthorized(e.to_string()),
        })?;
        Ok(claims.user_id)
    }

    /// The authenticated owner's profile, without credential fields.
    pub async fn my_profile(&self, username: &str) -> Result<ProfileView, MenuError> {
        let profile = self
            .repo
            .get_profile(username)
            .await?
            .ok_or_else(|| MenuError::NotFound {
                entity_type: "User",
                id: username.to_string(),
            })?;
        Ok(profile.view())
    }

    /// Partial profile update. Only the allow-listed fields can change.
    pub async fn update_profile(
        &self,
        username: &str,
        update: ProfileUpdate,
    ) -> Result<(), MenuError> {
        if update.is_empty() {
            return Err(MenuError::Validation("no fields to update".to_string()));
        }
        self.repo.update_profile(username, &update).await?;
        Ok(())
    }

    /// Uploads a profile image and records its public URL on the profile.
    ///
    /// Two steps without a transaction: a profile write failure after a
    /// successful upload leaves the object orphaned in the store.
    #[instrument(skip(self, bytes), fields(username = %username, size = bytes.len()))]
    pub async fn upload_profile_image(
        &self,
        username: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, MenuError> {
        if !content_type.starts_with("image/") {
            return Err(MenuError::Validation(format!(
                "unsupported content type: {content_type}"
            )));
        }
        if bytes.is_empty() {
            return Err(MenuError::Validation("empty image payload".to_string()));
        }

        self.repo
            .get_profile(username)
            .await?
            .ok_or_else(|| MenuError::NotFound {
                entity_type: "User",
                id: username.to_string(),
            })?;

        let extension = content_type.split('/').next_back().unwrap_or("bin");
        let key = format!(
            "users_images/{}/profile_{}.{}",
            username,
            Utc::now().timestamp_millis(),
            extension
        );
        let url = self.objects.put_object(&key, bytes, content_type).await?;

        if let Err(e) = self
            .repo
            .update_profile(username, &ProfileUpdate::image_url(url.clone()))
            .await
        {
            warn!(error = %e, "image uploaded but profile write failed");
            return Err(MenuError::PartialMutation(format!(
                "image stored at {url} but profile was not updated: {e}"
            )));
        }

        debug!(%url, "profile image updated");
        Ok(url)
    }

    /// Deletes the owner's profile and every category and product item in
    /// the owner's partition.
    #[instrument(skip(self), fields(username = %username))]
    pub async fn delete_account(&self, username: &str) -> Result<(), MenuError> {
        let (categories, products) = tokio::try_join!(
            self.repo.list_categories(username),
            self.repo.list_products(username)
        )?;

        let mut item_keys: Vec<ItemKey> = Vec::with_capacity(categories.len() + products.len() + 1);
        item_keys.extend(
            products
                .iter()
                .map(|p| ItemKey::product(username, p.id)),
        );
        item_keys.extend(
            categories
                .iter()
                .map(|c| ItemKey::category(username, c.id)),
        );
        item_keys.push(ItemKey::profile(username));

        self.repo.batch_delete(&item_keys).await.map_err(|e| {
            MenuError::PartialMutation(format!("account deletion stopped part-way: {e}"))
        })?;

        debug!(items = item_keys.len(), "account deleted");
        Ok(())
    }

    // ========================================================================
    // Categories
    // ========================================================================

    /// Creates a category at the end of the display order.
    ///
    /// The order value is sibling-count + 1 read at creation time; two
    /// concurrent creations can land on the same value. Duplicates are kept
    /// and only an explicit reorder resolves them.
    pub async fn create_category(
        &self,
        username: &str,
        request: CreateCategoryRequest,
    ) -> Result<Category, MenuError> {
        request.validate()?;

        let siblings = self.repo.list_categories(username).await?;
        let category = Category::new(
            username,
            request.category_name,
            ordering::next_order(siblings.len()),
        );
        self.repo.put_category(&category).await?;
        Ok(category)
    }

    /// Partial category update. The category must exist.
    pub async fn update_category(
        &self,
        username: &str,
        id: Uuid,
        update: CategoryUpdate,
    ) -> Result<(), MenuError> {
        if update.is_empty() {
            return Err(MenuError::Validation("no fields to update".to_string()));
        }
        self.require_category(username, id).await?;
        self.repo.update_category(username, id, &update).await?;
        Ok(())
    }

    /// Deletes a category and cascades over its products.
    ///
    /// The products go first, in batches; the parent item goes last. A
    /// failure in between leaves the category present with some products
    /// already gone, or products gone with the category still listed.
    #[instrument(skip(self), fields(username = %username, category_id = %id))]
    pub async fn delete_category(&self, username: &str, id: Uuid) -> Result<(), MenuError> {
        self.require_category(username, id).await?;

        let products = self.repo.list_products_by_category(id).await?;
        let item_keys: Vec<ItemKey> = products
            .iter()
            .map(|p| ItemKey::product(&p.owner, p.id))
            .collect();

        self.repo.batch_delete(&item_keys).await.map_err(|e| {
            MenuError::PartialMutation(format!(
                "cascade over {} products stopped part-way: {e}",
                item_keys.len()
            ))
        })?;

        self.repo
            .delete_category_item(username, id)
            .await
            .map_err(|e| {
                MenuError::PartialMutation(format!(
                    "products deleted but the category item remains: {e}"
                ))
            })?;

        debug!(products = item_keys.len(), "category deleted");
        Ok(())
    }

    /// Applies new order values one update at a time, no rollback. A failure
    /// mid-way leaves the earlier entries reordered.
    pub async fn reorder_categories(
        &self,
        username: &str,
        entries: &[ReorderEntry],
    ) -> Result<(), MenuError> {
        for (applied, entry) in entries.iter().enumerate() {
            self.repo
                .update_category(username, entry.id, &CategoryUpdate::order(entry.order))
                .await
                .map_err(|e| {
                    MenuError::PartialMutation(format!(
                        "applied {applied} of {} reorder updates: {e}",
                        entries.len()
                    ))
                })?;
        }
        Ok(())
    }

    // ========================================================================
    // Products
    // ========================================================================

    /// Creates a product at the end of its category's display order. The
    /// category must exist.
    pub async fn create_product(
        &self,
        username: &str,
        request: CreateProductRequest,
    ) -> Result<Product, MenuError> {
        request.validate()?;
        self.require_category(username, request.category_id).await?;

        let siblings = self
            .repo
            .list_products_by_category(request.category_id)
            .await?;
        let product = Product::new(
            username,
            request.category_id,
            request.product_name,
            request.price,
            request.description,
            ordering::next_order(siblings.len()),
        );
        self.repo.put_product(&product).await?;
        Ok(product)
    }

    /// Partial product update. The product must exist; its category
    /// reference cannot change.
    pub async fn update_product(
        &self,
        username: &str,
        id: Uuid,
        update: ProductUpdate,
    ) -> Result<(), MenuError> {
        update.validate()?;
        if update.is_empty() {
            return Err(MenuError::Validation("no fields to update".to_string()));
        }
        self.require_product(username, id).await?;
        self.repo.update_product(username, id, &update).await?;
        Ok(())
    }

    /// Shows or hides a product on the public menu.
    pub async fn set_product_active(
        &self,
        username: &str,
        id: Uuid,
        is_active: bool,
    ) -> Result<(), MenuError> {
        self.require_product(username, id).await?;
        self.repo
            .update_product(username, id, &ProductUpdate::active(is_active))
            .await?;
        Ok(())
    }

    /// Deletes a product. Deleting an already-absent product is a no-op.
    pub async fn delete_product(&self, username: &str, id: Uuid) -> Result<(), MenuError> {
        self.repo.delete_product(username, id).await?;
        Ok(())
    }

    /// Reorders products, same contract as [`reorder_categories`].
    ///
    /// [`reorder_categories`]: MenuService::reorder_categories
    pub async fn reorder_products(
        &self,
        username: &str,
        entries: &[ReorderEntry],
    ) -> Result<(), MenuError> {
        for (applied, entry) in entries.iter().enumerate() {
            self.repo
                .update_product(username, entry.id, &ProductUpdate::order(entry.order))
                .await
                .map_err(|e| {
                    MenuError::PartialMutation(format!(
                        "applied {applied} of {} reorder updates: {e}",
                        entries.len()
                    ))
                })?;
        }
        Ok(())
    }

    // ========================================================================
    // Menu views
    // ========================================================================

    /// The owner's full menu: two concurrent partition queries joined in
    /// memory. Inactive products are included.
    pub async fn my_menu(&self, username: &str) -> Result<OwnerMenu, MenuError> {
        let (categories, products) = tokio::try_join!(
            self.repo.list_categories(username),
            self.repo.list_products(username)
        )?;
        Ok(projection::owner_menu(categories, products))
    }

    /// The diner-facing menu of a restaurant. Queries the secondary index
    /// once per category, sequentially.
    #[instrument(skip(self), fields(username = %username))]
    pub async fn view_menu(&self, username: &str) -> Result<PublicMenu, MenuError> {
        let profile = self
            .repo
            .get_profile(username)
            .await?
            .ok_or_else(|| MenuError::NotFound {
                entity_type: "User",
                id: username.to_string(),
            })?;

        let categories = self.repo.list_categories(username).await?;

        let mut products_by_category: HashMap<Uuid, Vec<Product>> = HashMap::new();
        for category in &categories {
            let products = self.repo.list_products_by_category(category.id).await?;
            products_by_category.insert(category.id, products);
        }

        Ok(projection::public_menu(profile.view(), categories, |id| {
            products_by_category.get(&id).cloned().unwrap_or_default()
        }))
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    async fn require_category(&self, username: &str, id: Uuid) -> Result<Category, MenuError> {
        self.repo
            .get_category(username, id)
            .await?
            .ok_or_else(|| MenuError::NotFound {
                entity_type: "Category",
                id: id.to_string(),
            })
    }

    async fn require_product(&self, username: &str, id: Uuid) -> Result<Product, MenuError> {
        self.repo
            .get_product(username, id)
            .await?
            .ok_or_else(|| MenuError::NotFound {
                entity_type: "Product",
                id: id.to_string(),
            })
    }
}
