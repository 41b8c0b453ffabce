use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the wide table (default: "menuqr")
    pub table_name: String,
    /// Secret used to sign and verify access tokens.
    pub jwt_secret: String,
    /// Bucket for profile images (default: "menuqr-images")
    /// Note: Only used when the `s3` feature is enabled.
    pub image_bucket: String,
    /// Base URL prepended to stored object keys to form public image URLs.
    pub image_base_url: String,
}

/// A required environment variable is missing.
#[derive(Debug, thiserror::Error)]
#[error("missing required environment variable: {0}")]
pub struct MissingEnvVar(&'static str);

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TABLE_NAME` - Wide table name (default: "menuqr")
    /// - `JWT_SECRET` - Token signing secret (required)
    /// - `IMAGE_BUCKET` - Profile image bucket (default: "menuqr-images")
    /// - `IMAGE_BASE_URL` - Public URL prefix for images
    ///   (default: "https://menuqr-images.s3.amazonaws.com")
    pub fn from_env() -> Result<Self, MissingEnvVar> {
        let jwt_secret = env::var("JWT_SECRET").map_err(|_| MissingEnvVar("JWT_SECRET"))?;

        Ok(Self {
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "menuqr".to_string()),
            jwt_secret,
            image_bucket: env::var("IMAGE_BUCKET").unwrap_or_else(|_| "menuqr-images".to_string()),
            image_base_url: env::var("IMAGE_BASE_URL")
                .unwrap_or_else(|_| "https://menuqr-images.s3.amazonaws.com".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: these mutate the process environment and must not
    // interleave with each other.
    #[test]
    fn test_from_env() {
        env::remove_var("JWT_SECRET");
        assert!(Config::from_env().is_err());

        env::set_var("JWT_SECRET", "test-secret");
        env::remove_var("TABLE_NAME");
        env::remove_var("IMAGE_BUCKET");
        env::remove_var("IMAGE_BASE_URL");

        let config = Config::from_env().unwrap();

        assert_eq!(config.table_name, "menuqr");
        assert_eq!(config.image_bucket, "menuqr-images");
        assert_eq!(
            config.image_base_url,
            "https://menuqr-images.s3.amazonaws.com"
        );
    }
}
