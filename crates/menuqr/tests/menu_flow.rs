//! End-to-end flows over the in-memory backend: account lifecycle, menu
//! management, ordering, cascade deletes and the public projection.

use std::sync::Arc;

use uuid::Uuid;

use menuqr::storage::{InMemoryObjectStore, InMemoryRepository};
use menuqr::MenuService;
use menuqr_auth::{Argon2Hasher, JwtTokenService};
use menuqr_core::storage::{CategoryRepository, ProductRepository};

use menuqr_core::menu::{
    CategoryUpdate, CreateCategoryRequest, CreateProductRequest, LoginRequest, MenuError,
    ProductUpdate, ProfileUpdate, ReorderEntry, SignupRequest,
};

struct Harness {
    service: MenuService<InMemoryRepository>,
    repo: Arc<InMemoryRepository>,
    objects: Arc<InMemoryObjectStore>,
}

fn harness() -> Harness {
    let repo = Arc::new(InMemoryRepository::new());
    let objects = Arc::new(InMemoryObjectStore::new("https://img.test"));
    let service = MenuService::new(
        repo.clone(),
        Arc::new(JwtTokenService::new("integration-secret")),
        Arc::new(Argon2Hasher),
        objects.clone(),
    );
    Harness {
        service,
        repo,
        objects,
    }
}

fn signup_request(username: &str) -> SignupRequest {
    SignupRequest {
        username: username.to_string(),
        password: "correct horse battery".to_string(),
        local_name: format!("{username} restaurant"),
        phone_number: "+598 99 123 456".to_string(),
        description: Some("family owned".to_string()),
        social_media: vec![format!("https://instagram.com/{username}")],
    }
}

async fn category(h: &Harness, owner: &str, name: &str) -> Uuid {
    h.service
        .create_category(
            owner,
            CreateCategoryRequest {
                category_name: name.to_string(),
            },
        )
        .await
        .unwrap()
        .id
}

async fn product(h: &Harness, owner: &str, category_id: Uuid, name: &str, price: f64) -> Uuid {
    h.service
        .create_product(
            owner,
            CreateProductRequest {
                category_id,
                product_name: name.to_string(),
                price,
                description: format!("{name} description"),
            },
        )
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn full_owner_lifecycle() {
    let h = harness();

    h.service.signup(signup_request("tacos")).await.unwrap();
    let token = h
        .service
        .login(LoginRequest {
            username: "tacos".to_string(),
            password: "correct horse battery".to_string(),
        })
        .await
        .unwrap();
    let user = h.service.authenticate(&token).unwrap();
    assert_eq!(user, "tacos");

    let drinks = category(&h, &user, "Drinks").await;
    let mains = category(&h, &user, "Mains").await;
    product(&h, &user, drinks, "Agua", 1.0).await;
    product(&h, &user, drinks, "Cola", 1.5).await;
    product(&h, &user, mains, "Barbacoa", 9.5).await;

    let menu = h.service.my_menu(&user).await.unwrap();
    assert_eq!(menu.categories.len(), 2);
    assert_eq!(menu.categories[0].category.name, "Drinks");
    assert_eq!(menu.categories[0].products.len(), 2);
    assert_eq!(menu.categories[1].products.len(), 1);
}

#[tokio::test]
async fn public_menu_hides_internals_and_inactive_products() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();
    let drinks = category(&h, "tacos", "Drinks").await;
    let cola = product(&h, "tacos", drinks, "Cola", 1.5).await;
    let seasonal = product(&h, "tacos", drinks, "Ponche", 3.0).await;

    h.service
        .set_product_active("tacos", seasonal, false)
        .await
        .unwrap();

    let menu = h.service.view_menu("tacos").await.unwrap();
    assert_eq!(menu.profile.local_name, "tacos restaurant");
    assert_eq!(menu.categories.len(), 1);
    let products = &menu.categories[0].products;
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].product_id, cola);

    let json = serde_json::to_string(&menu).unwrap();
    assert!(!json.contains("passwordHash"));
    assert!(!json.contains("isActive"));

    // The owner still sees the hidden product.
    let owner_menu = h.service.my_menu("tacos").await.unwrap();
    assert_eq!(owner_menu.categories[0].products.len(), 2);
}

#[tokio::test]
async fn view_menu_for_unknown_restaurant_is_not_found() {
    let h = harness();
    let err = h.service.view_menu("ghost").await.unwrap_err();
    assert!(matches!(
        err,
        MenuError::NotFound {
            entity_type: "User",
            ..
        }
    ));
}

#[tokio::test]
async fn reorder_changes_display_sequence() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();
    let drinks = category(&h, "tacos", "Drinks").await;
    let mains = category(&h, "tacos", "Mains").await;
    let desserts = category(&h, "tacos", "Desserts").await;

    h.service
        .reorder_categories(
            "tacos",
            &[
                ReorderEntry {
                    id: desserts,
                    order: 1,
                },
                ReorderEntry {
                    id: drinks,
                    order: 2,
                },
                ReorderEntry { id: mains, order: 3 },
            ],
        )
        .await
        .unwrap();

    let menu = h.service.my_menu("tacos").await.unwrap();
    let names: Vec<_> = menu
        .categories
        .iter()
        .map(|c| c.category.name.as_str())
        .collect();
    assert_eq!(names, vec!["Desserts", "Drinks", "Mains"]);
}

#[tokio::test]
async fn reorder_products_within_category() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();
    let drinks = category(&h, "tacos", "Drinks").await;
    let agua = product(&h, "tacos", drinks, "Agua", 1.0).await;
    let cola = product(&h, "tacos", drinks, "Cola", 1.5).await;

    h.service
        .reorder_products(
            "tacos",
            &[
                ReorderEntry { id: cola, order: 1 },
                ReorderEntry { id: agua, order: 2 },
            ],
        )
        .await
        .unwrap();

    let menu = h.service.my_menu("tacos").await.unwrap();
    let names: Vec<_> = menu.categories[0]
        .products
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["Cola", "Agua"]);
}

#[tokio::test]
async fn update_product_fields_and_price() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();
    let drinks = category(&h, "tacos", "Drinks").await;
    let cola = product(&h, "tacos", drinks, "Cola", 1.5).await;

    h.service
        .update_product(
            "tacos",
            cola,
            ProductUpdate {
                price: Some(1.8),
                description: Some("50cl bottle".to_string()),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();

    let menu = h.service.my_menu("tacos").await.unwrap();
    let updated = &menu.categories[0].products[0];
    assert_eq!(updated.price, 1.8);
    assert_eq!(updated.description, "50cl bottle");
    assert_eq!(updated.name, "Cola");
}

#[tokio::test]
async fn cascade_delete_spans_multiple_batches() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();
    let drinks = category(&h, "tacos", "Drinks").await;
    let mains = category(&h, "tacos", "Mains").await;
    for i in 0..60 {
        product(&h, "tacos", drinks, &format!("D{i}"), 1.0).await;
    }
    let kept = product(&h, "tacos", mains, "Barbacoa", 9.5).await;

    h.service.delete_category("tacos", drinks).await.unwrap();

    let remaining = h.repo.list_products("tacos").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
    assert_eq!(h.repo.list_categories("tacos").await.unwrap().len(), 1);
}

#[tokio::test]
async fn cascade_partial_failure_leaves_orphans_visible_to_retry() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();
    let drinks = category(&h, "tacos", "Drinks").await;
    for i in 0..30 {
        product(&h, "tacos", drinks, &format!("D{i}"), 1.0).await;
    }

    h.repo.fail_batch_delete_after(1).await;
    let err = h.service.delete_category("tacos", drinks).await.unwrap_err();
    assert!(matches!(err, MenuError::PartialMutation(_)));

    // The category survived the failure, so a retry can finish the job.
    h.service.delete_category("tacos", drinks).await.unwrap();
    assert!(h.repo.list_products("tacos").await.unwrap().is_empty());
    assert!(h.repo.list_categories("tacos").await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_category_creation_can_duplicate_order() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();

    // Sibling counts are read without coordination, so the two creations
    // may both observe an empty list.
    let (a, b) = tokio::join!(
        h.service.create_category(
            "tacos",
            CreateCategoryRequest {
                category_name: "A".to_string()
            }
        ),
        h.service.create_category(
            "tacos",
            CreateCategoryRequest {
                category_name: "B".to_string()
            }
        )
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    // Orders may collide; both categories exist either way and the menu
    // still lists both.
    assert!(a.order.is_some() && b.order.is_some());
    let menu = h.service.my_menu("tacos").await.unwrap();
    assert_eq!(menu.categories.len(), 2);
}

#[tokio::test]
async fn profile_update_and_image_upload() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();

    h.service
        .update_profile(
            "tacos",
            ProfileUpdate {
                description: Some("now with churros".to_string()),
                phone_number: Some("+598 99 000 000".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .await
        .unwrap();

    let url = h
        .service
        .upload_profile_image("tacos", vec![0x89, 0x50, 0x4E, 0x47], "image/png")
        .await
        .unwrap();

    let profile = h.service.my_profile("tacos").await.unwrap();
    assert_eq!(profile.description, Some("now with churros".to_string()));
    assert_eq!(profile.phone_number, "+598 99 000 000");
    assert_eq!(profile.image_url, Some(url.clone()));
    assert_eq!(h.objects.object_count().await, 1);

    // The upload key is namespaced under the owner.
    let key = url.strip_prefix("https://img.test/").unwrap();
    assert!(key.starts_with("users_images/tacos/profile_"));
    assert!(h.objects.get(key).await.is_some());
}

#[tokio::test]
async fn failed_upload_leaves_profile_untouched() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();

    h.objects.fail_next_upload().await;
    let err = h
        .service
        .upload_profile_image("tacos", vec![1, 2, 3], "image/png")
        .await
        .unwrap_err();
    assert!(matches!(err, MenuError::Upload(_)));

    let profile = h.service.my_profile("tacos").await.unwrap();
    assert!(profile.image_url.is_none());
}

#[tokio::test]
async fn tenants_are_isolated_end_to_end() {
    let h = harness();
    h.service.signup(signup_request("alice")).await.unwrap();
    h.service.signup(signup_request("bob")).await.unwrap();
    let alice_drinks = category(&h, "alice", "Drinks").await;
    product(&h, "alice", alice_drinks, "Cola", 1.5).await;
    category(&h, "bob", "Pizzas").await;

    let alice_menu = h.service.my_menu("alice").await.unwrap();
    let bob_menu = h.service.my_menu("bob").await.unwrap();
    assert_eq!(alice_menu.categories.len(), 1);
    assert_eq!(alice_menu.categories[0].category.name, "Drinks");
    assert_eq!(bob_menu.categories.len(), 1);
    assert_eq!(bob_menu.categories[0].products.len(), 0);

    // Bob cannot mutate Alice's data through any operation.
    assert!(h
        .service
        .update_category("bob", alice_drinks, CategoryUpdate::order(9))
        .await
        .is_err());
    assert!(h.service.delete_category("bob", alice_drinks).await.is_err());
}

#[tokio::test]
async fn expired_and_forged_tokens_are_rejected() {
    let h = harness();
    h.service.signup(signup_request("tacos")).await.unwrap();

    let err = h.service.authenticate("not-a-token").unwrap_err();
    assert!(matches!(err, MenuError::Unauthorized(_)));

    let forged = JwtTokenService::new("other-secret");
    let token = menuqr_core::auth::TokenService::issue(&forged, "tacos").unwrap();
    let err = h.service.authenticate(&token).unwrap_err();
    assert!(matches!(err, MenuError::Unauthorized(_)));
}
