mod error;
mod traits;
mod types;

pub mod keys;

pub use error::{RepositoryError, Result, UploadError};
pub use traits::{
    CategoryRepository, ObjectStore, ProductRepository, ProfileRepository,
};
pub use types::{ItemKey, MAX_BATCH_DELETE};
