//! Common types used across the application.

pub mod id;
pub mod money;
pub mod period;

pub use id::*;
pub use money::{Currency, format_amount};
pub use period::{MONTHS, Month, RecordType};
