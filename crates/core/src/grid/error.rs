//! Grid error types.

use thiserror::Error;

/// Errors raised while reading or saving a monthly grid.
#[derive(Debug, Error)]
pub enum GridError {
    /// An edited row references a dimension member that does not exist.
    #[error("Unknown {dimension} id: {id}")]
    UnknownDimension {
        /// Dimension column name, e.g. `grade_id`.
        dimension: &'static str,
        /// Offending id.
        id: i32,
    },

    /// Reading dimensions or facts failed.
    #[error("Failed to load {table}: {message}")]
    Query {
        /// Table being read.
        table: &'static str,
        /// Underlying error text.
        message: String,
    },

    /// The bulk upsert failed.
    #[error("Failed to save {table}: {message}")]
    Write {
        /// Table being written.
        table: &'static str,
        /// Underlying error text.
        message: String,
    },
}

impl GridError {
    /// Create a query error.
    #[must_use]
    pub fn query(table: &'static str, message: impl Into<String>) -> Self {
        Self::Query {
            table,
            message: message.into(),
        }
    }

    /// Create a write error.
    #[must_use]
    pub fn write(table: &'static str, message: impl Into<String>) -> Self {
        Self::Write {
            table,
            message: message.into(),
        }
    }
}
