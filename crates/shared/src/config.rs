//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage for archived invoice PDFs (optional).
    #[serde(default)]
    pub storage: Option<StorageSettings>,
    /// AI document extraction (optional).
    #[serde(default)]
    pub extraction: Option<ExtractionConfig>,
    /// Invoice issuer and defaults.
    #[serde(default)]
    pub invoice: InvoiceConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Object storage configuration.
///
/// `provider` is `s3` (Supabase Storage, R2, AWS) or `local_fs`.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Provider name: `s3` or `local_fs`.
    pub provider: String,
    /// Bucket name (S3) or root directory (local_fs).
    pub bucket: String,
    /// S3 endpoint URL.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// S3 region.
    #[serde(default = "default_region")]
    pub region: String,
    /// S3 access key ID.
    #[serde(default)]
    pub access_key_id: Option<String>,
    /// S3 secret access key.
    #[serde(default)]
    pub secret_access_key: Option<String>,
    /// Base URL under which stored objects are publicly readable.
    pub public_base_url: String,
    /// Maximum upload size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

fn default_region() -> String {
    "auto".to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

/// AI document extraction configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// API key for the extraction service.
    pub api_key: String,
    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the generative language API.
    #[serde(default = "default_extraction_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_extraction_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

/// Invoice issuer details and form defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct InvoiceConfig {
    /// Issuing company name.
    #[serde(default = "default_issuer_name")]
    pub issuer_name: String,
    /// Issuing company address line.
    #[serde(default = "default_issuer_address")]
    pub issuer_address: String,
    /// Default bill-to party.
    #[serde(default = "default_bill_to")]
    pub default_bill_to: String,
    /// Default management fee percentage.
    #[serde(default = "default_fee_pct")]
    pub default_fee_pct: Decimal,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            issuer_name: default_issuer_name(),
            issuer_address: default_issuer_address(),
            default_bill_to: default_bill_to(),
            default_fee_pct: default_fee_pct(),
        }
    }
}

fn default_issuer_name() -> String {
    "FCO Management Ltd".to_string()
}

fn default_issuer_address() -> String {
    "Napier, NZ".to_string()
}

fn default_bill_to() -> String {
    "CFG Forestry Group".to_string()
}

fn default_fee_pct() -> Decimal {
    Decimal::from(8)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TIMBERLINE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("TIMBERLINE__DATABASE__URL", Some("sqlite::memory:")),
                ("TIMBERLINE__SERVER__PORT", Some("9090")),
                ("TIMBERLINE__INVOICE__ISSUER_NAME", Some("Acme Forestry")),
            ],
            || {
                let config = AppConfig::load().expect("config should load");
                assert_eq!(config.database.url, "sqlite::memory:");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.invoice.issuer_name, "Acme Forestry");
                assert_eq!(config.invoice.default_fee_pct, dec!(8));
                assert!(config.storage.is_none());
                assert!(config.extraction.is_none());
            },
        );
    }

    #[test]
    fn test_missing_database_url_fails() {
        temp_env::with_var_unset("TIMBERLINE__DATABASE__URL", || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_invoice_defaults() {
        let invoice = InvoiceConfig::default();
        assert_eq!(invoice.issuer_address, "Napier, NZ");
        assert_eq!(invoice.default_bill_to, "CFG Forestry Group");
    }
}
