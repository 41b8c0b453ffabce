//! In-memory object store for testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use menuqr_core::storage::{ObjectStore, UploadError};

/// Holds uploaded objects in a map and fabricates URLs from a base prefix.
#[derive(Clone)]
pub struct InMemoryObjectStore {
    base_url: String,
    objects: Arc<RwLock<HashMap<String, (Vec<u8>, String)>>>,
    fail_next: Arc<RwLock<bool>>,
}

impl InMemoryObjectStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
            fail_next: Arc::new(RwLock::new(false)),
        }
    }

    /// Makes the next upload fail.
    pub async fn fail_next_upload(&self) {
        *self.fail_next.write().await = true;
    }

    /// Returns the stored bytes and content type for a key.
    pub async fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn object_count(&self) -> usize {
        self.objects.read().await.len()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, UploadError> {
        let mut fail = self.fail_next.write().await;
        if *fail {
            *fail = false;
            return Err(UploadError("injected upload failure".to_string()));
        }
        drop(fail);

        self.objects
            .write()
            .await
            .insert(key.to_string(), (bytes, content_type.to_string()));
        Ok(format!("{}/{}", self.base_url, key))
    }
}
