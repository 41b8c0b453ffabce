//! In-memory table backend for testing.

mod repository;

pub use repository::InMemoryRepository;
