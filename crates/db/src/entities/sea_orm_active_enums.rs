//! `SeaORM` active enums.
//!
//! Stored as plain strings so the same schema runs on `PostgreSQL` and `SQLite`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum RecordType {
    #[sea_orm(string_value = "Budget")]
    Budget,
    #[sea_orm(string_value = "Actual")]
    Actual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ArchiveStatus {
    #[sea_orm(string_value = "Verified")]
    Verified,
    #[sea_orm(string_value = "Manual Check")]
    ManualCheck,
}

impl From<timberline_shared::types::RecordType> for RecordType {
    fn from(value: timberline_shared::types::RecordType) -> Self {
        match value {
            timberline_shared::types::RecordType::Budget => Self::Budget,
            timberline_shared::types::RecordType::Actual => Self::Actual,
        }
    }
}

impl From<RecordType> for timberline_shared::types::RecordType {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Budget => Self::Budget,
            RecordType::Actual => Self::Actual,
        }
    }
}

impl From<timberline_core::reconciliation::ArchiveStatus> for ArchiveStatus {
    fn from(value: timberline_core::reconciliation::ArchiveStatus) -> Self {
        match value {
            timberline_core::reconciliation::ArchiveStatus::Verified => Self::Verified,
            timberline_core::reconciliation::ArchiveStatus::ManualCheck => Self::ManualCheck,
        }
    }
}

impl From<ArchiveStatus> for timberline_core::reconciliation::ArchiveStatus {
    fn from(value: ArchiveStatus) -> Self {
        match value {
            ArchiveStatus::Verified => Self::Verified,
            ArchiveStatus::ManualCheck => Self::ManualCheck,
        }
    }
}
