//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `menuqr_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-memory table backend, used by the tests
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `s3`: S3 object store for profile images
//!
//! The table backends are mutually exclusive.

#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!(
    "Features 'inmemory' and 'dynamodb' are mutually exclusive. \
    Enable only one table backend at a time."
);

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No table backend selected. Enable 'inmemory' or 'dynamodb'. \
    Example: cargo build -p menuqr --features inmemory"
);

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "s3")]
pub mod s3;

pub mod memory_object_store;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRepository;

#[cfg(feature = "s3")]
pub use s3::S3ObjectStore;

pub use memory_object_store::InMemoryObjectStore;
