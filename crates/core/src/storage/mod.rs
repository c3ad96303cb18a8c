//! Object storage for archived invoice documents using Apache OpenDAL.
//!
//! Supported backends:
//! - S3-compatible: Supabase Storage, Cloudflare R2, AWS S3
//! - Local filesystem (development only)

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StorageService, StoredObject, sanitize_filename};
