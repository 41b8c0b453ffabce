use super::keys;
use uuid::Uuid;

/// Maximum number of delete requests per underlying batch-write call.
///
/// DynamoDB's `BatchWriteItem` hard limit; the in-memory backend honors the
/// same chunking so partial-failure behavior matches.
pub const MAX_BATCH_DELETE: usize = 25;

/// Fully qualified primary key of one table item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub pk: String,
    pub sk: String,
}

impl ItemKey {
    pub fn new(pk: impl Into<String>, sk: impl Into<String>) -> Self {
        Self {
            pk: pk.into(),
            sk: sk.into(),
        }
    }

    /// Key of an owner's profile item.
    pub fn profile(username: &str) -> Self {
        Self::new(keys::user_pk(username), keys::profile_sk())
    }

    /// Key of a category item.
    pub fn category(owner: &str, category_id: Uuid) -> Self {
        Self::new(keys::user_pk(owner), keys::category_sk(category_id))
    }

    /// Key of a product item.
    pub fn product(owner: &str, product_id: Uuid) -> Self {
        Self::new(keys::user_pk(owner), keys::product_sk(product_id))
    }
}
