//! Storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use timberline_shared::StorageSettings;

use super::error::StorageError;

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: Supabase Storage, Cloudflare R2, AWS S3
    S3 {
        /// S3 endpoint URL; AWS default when absent.
        endpoint: Option<String>,
        /// S3 bucket name.
        bucket: String,
        /// Access key ID.
        access_key_id: String,
        /// Secret access key.
        secret_access_key: String,
        /// Region.
        region: String,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local_fs",
        }
    }

    /// Get the bucket name or root directory.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Base URL under which stored keys are publicly readable.
    pub public_base_url: String,
    /// Maximum file size in bytes.
    pub max_file_size: u64,
    /// Allowed MIME types for upload.
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Default max file size: 10MB.
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider, public_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            public_base_url: public_base_url.into(),
            max_file_size: Self::DEFAULT_MAX_FILE_SIZE,
            allowed_mime_types: vec!["application/pdf".to_string()],
        }
    }

    /// Build from application settings.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider or missing S3 credentials.
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, StorageError> {
        let provider = match settings.provider.as_str() {
            "s3" => StorageProvider::S3 {
                endpoint: settings.endpoint.clone(),
                bucket: settings.bucket.clone(),
                access_key_id: settings
                    .access_key_id
                    .clone()
                    .ok_or_else(|| StorageError::configuration("access_key_id is required for s3"))?,
                secret_access_key: settings.secret_access_key.clone().ok_or_else(|| {
                    StorageError::configuration("secret_access_key is required for s3")
                })?,
                region: settings.region.clone(),
            },
            "local_fs" | "fs" => StorageProvider::local_fs(&settings.bucket),
            other => {
                return Err(StorageError::configuration(format!(
                    "unknown storage provider '{other}'"
                )));
            }
        };

        Ok(Self::new(provider, settings.public_base_url.clone())
            .with_max_file_size(settings.max_file_size))
    }

    /// Set maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Check if a MIME type is allowed.
    #[must_use]
    pub fn is_mime_type_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types.iter().any(|t| t == mime_type)
    }
}
