//! Domain types and pure logic for restaurant menus.

mod error;
mod requests;
mod types;

pub mod ordering;
pub mod projection;

pub use error::{menu_error_to_status_code, MenuError};
pub use requests::{
    CategoryUpdate, CreateCategoryRequest, CreateProductRequest, LoginRequest, ProductUpdate,
    ProfileUpdate, ReorderEntry, SignupRequest,
};
pub use types::{Category, Product, ProfileView, UserProfile};
