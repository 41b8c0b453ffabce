//! S3 object store for profile images.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use menuqr_core::storage::{ObjectStore, UploadError};

use crate::config::Config;

/// Stores profile images in an S3 bucket and returns public URLs built from
/// a configured base prefix.
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
    base_url: String,
}

impl S3ObjectStore {
    pub fn new(client: Client, bucket: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            base_url: base_url.into(),
        }
    }

    /// Creates an object store from the application configuration and a
    /// shared SDK config (credential chain resolved once by the caller).
    pub fn from_config(sdk_config: &aws_config::SdkConfig, config: &Config) -> Self {
        Self::new(
            Client::new(sdk_config),
            config.image_bucket.clone(),
            config.image_base_url.clone(),
        )
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, UploadError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| UploadError(format!("PutObject failed: {e}")))?;

        Ok(format!("{}/{}", self.base_url, key))
    }
}
