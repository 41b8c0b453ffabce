use super::{Claims, Result};

/// Issues and verifies stateless access tokens.
pub trait TokenService: Send + Sync {
    /// Issues a signed token for the given username.
    fn issue(&self, user_id: &str) -> Result<String>;

    /// Verifies a token's signature and expiry and returns its claims.
    fn verify(&self, token: &str) -> Result<Claims>;
}

/// Hashes and verifies passwords.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String>;

    /// Checks a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}
