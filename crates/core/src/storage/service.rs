//! Storage service implementation using Apache OpenDAL.

use chrono::{DateTime, Utc};
use opendal::{Operator, services};
use tracing::info;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// An object written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Storage key.
    pub key: String,
    /// Public URL of the object.
    pub url: String,
    /// Size in bytes.
    pub size: u64,
}

/// Storage service for archived invoice documents.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                endpoint,
                bucket,
                access_key_id,
                secret_access_key,
                region,
            } => {
                let mut builder = services::S3::default()
                    .bucket(bucket)
                    .access_key_id(access_key_id)
                    .secret_access_key(secret_access_key)
                    .region(region);
                if let Some(endpoint) = endpoint {
                    builder = builder.endpoint(endpoint);
                }

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Validate an upload against config constraints.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is empty, too large, or of a disallowed type.
    pub fn validate_upload(&self, content_type: &str, size: u64) -> Result<(), StorageError> {
        if size == 0 {
            return Err(StorageError::EmptyFile);
        }

        if size > self.config.max_file_size {
            return Err(StorageError::FileTooLarge {
                size,
                max: self.config.max_file_size,
            });
        }

        if !self.config.is_mime_type_allowed(content_type) {
            return Err(StorageError::InvalidMimeType {
                mime_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    /// Generate the archive key for an uploaded file.
    ///
    /// Format: `{unix_seconds}_{sanitized_filename}`
    #[must_use]
    pub fn archive_key(filename: &str, uploaded_at: DateTime<Utc>) -> String {
        format!("{}_{}", uploaded_at.timestamp(), sanitize_filename(filename))
    }

    /// Public URL of a stored key.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.config.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }

    /// Validate and write a file.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the write fails.
    pub async fn upload(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let size = bytes.len() as u64;
        self.validate_upload(content_type, size)?;

        self.operator
            .write_with(key, bytes)
            .content_type(content_type)
            .await?;

        info!(provider = self.provider_name(), key, size, "Stored document");

        Ok(StoredObject {
            key: key.to_string(),
            url: self.public_url(key),
            size,
        })
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
#[must_use]
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    base.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local_service(max: u64) -> (StorageService, std::path::PathBuf) {
        let root = std::env::temp_dir().join(format!("timberline-storage-{}", uuid::Uuid::new_v4()));
        let config = StorageConfig::new(
            StorageProvider::local_fs(&root),
            "https://files.example.com/invoices/",
        )
        .with_max_file_size(max);
        (
            StorageService::from_config(config).expect("should create service"),
            root,
        )
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("invoice.pdf"), "invoice.pdf");
        assert_eq!(sanitize_filename("my file (1).pdf"), "my_file__1_.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\scans\\inv.pdf"), "inv.pdf");
        assert_eq!(sanitize_filename("日本語.pdf"), "___.pdf");
    }

    #[test]
    fn test_archive_key() {
        let at = Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap();
        assert_eq!(
            StorageService::archive_key("Acme March.pdf", at),
            format!("{}_Acme_March.pdf", at.timestamp())
        );
    }

    #[test]
    fn test_public_url_joins_cleanly() {
        let (service, _) = local_service(1024);
        assert_eq!(
            service.public_url("123_a.pdf"),
            "https://files.example.com/invoices/123_a.pdf"
        );
    }

    #[test]
    fn test_validate_upload() {
        let (service, _) = local_service(1024);

        assert!(service.validate_upload("application/pdf", 512).is_ok());
        assert!(matches!(
            service.validate_upload("application/pdf", 2048),
            Err(StorageError::FileTooLarge { .. })
        ));
        assert!(matches!(
            service.validate_upload("image/png", 10),
            Err(StorageError::InvalidMimeType { .. })
        ));
        assert!(matches!(
            service.validate_upload("application/pdf", 0),
            Err(StorageError::EmptyFile)
        ));
    }

    #[tokio::test]
    async fn test_upload_to_local_fs() {
        let (service, root) = local_service(1024);

        let stored = service
            .upload("42_invoice.pdf", b"%PDF-1.4".to_vec(), "application/pdf")
            .await
            .unwrap();

        assert_eq!(stored.size, 8);
        assert_eq!(stored.url, "https://files.example.com/invoices/42_invoice.pdf");
        assert_eq!(std::fs::read(root.join("42_invoice.pdf")).unwrap(), b"%PDF-1.4");
        assert!(!root.join("missing.pdf").exists());

        let _ = std::fs::remove_dir_all(root);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }
}
