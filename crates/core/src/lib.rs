//! Core business logic for Timberline.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `grid` - Monthly fact pivot and upsert
//! - `invoice` - Client invoice computation and HTML rendering
//! - `extraction` - AI extraction of supplier invoice fields
//! - `reconciliation` - Invoice bot matching and archive
//! - `storage` - Object storage for archived documents
//! - `budget` - Budget vs actual variance
//! - `dashboard` - Executive dashboard aggregation
//! - `sales` - Sales ticket log

pub mod budget;
pub mod dashboard;
pub mod extraction;
pub mod grid;
pub mod invoice;
pub mod reconciliation;
pub mod sales;
pub mod storage;
