//! Shared types, errors, and configuration for Timberline.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for forests, grades, cost activities and documents
//! - Calendar month and record type (Budget/Actual) keys
//! - Currency codes and amount formatting
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AppConfig, DatabaseConfig, ExtractionConfig, InvoiceConfig, ServerConfig, StorageSettings,
};
pub use error::{AppError, AppResult};
