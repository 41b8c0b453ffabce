//! Concrete authentication backends: HS256 tokens and Argon2id password
//! hashing, implementing the traits from `menuqr_core::auth`.

mod jwt;
mod password;

pub use jwt::JwtTokenService;
pub use password::Argon2Hasher;
