use serde::{Deserialize, Serialize};

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the authenticated owner.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: impl Into<String>, exp: i64) -> Self {
        Self {
            user_id: user_id.into(),
            exp,
        }
    }
}
