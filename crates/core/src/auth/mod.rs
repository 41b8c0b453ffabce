//! Authentication seams: token and password-hashing traits plus the claims
//! carried by an access token. Concrete implementations live in `menuqr_auth`.

mod error;
mod functions;
mod traits;
mod types;

pub use error::{AuthError, Result};
pub use functions::bearer_token;
pub use traits::{PasswordHasher, TokenService};
pub use types::{Claims, TOKEN_TTL_SECS};
