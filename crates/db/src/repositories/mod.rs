//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod dimension;
pub mod fact;
pub mod invoice_archive;
pub mod report;
pub mod sales;

pub use dimension::{DimensionError, DimensionRepository};
pub use fact::FactRepository;
pub use invoice_archive::InvoiceArchiveRepository;
pub use report::{ReportError, ReportRepository};
pub use sales::SalesRepository;
