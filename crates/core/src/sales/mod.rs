//! Sales ticket log.
//!
//! Individual log sales tickets recorded against a forest. Saving resolves
//! grade codes to grade ids and recomputes the JAS conversion factor.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use timberline_shared::types::{ForestId, GradeId, SaleId};
use tracing::info;

use crate::grid::DimensionMember;
use crate::grid::schema::conversion_factor;

/// Number of tickets listed per forest.
pub const RECENT_TICKET_LIMIT: u64 = 50;

/// Sales errors.
#[derive(Debug, Error)]
pub enum SalesError {
    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),
}

/// A stored sales ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTicket {
    /// Ticket id.
    pub id: SaleId,
    /// Forest.
    pub forest_id: ForestId,
    /// Sale date.
    pub date: NaiveDate,
    /// Weighbridge ticket number.
    pub ticket_number: String,
    /// Buyer.
    pub customer: String,
    /// `Domestic` or `Export`.
    pub market: String,
    /// Resolved product grade.
    pub grade_id: Option<GradeId>,
    /// Grade code of the resolved grade.
    pub grade_code: Option<String>,
    /// Net tonnes.
    pub net_tonnes: Decimal,
    /// JAS cubic metres.
    pub jas: Decimal,
    /// JAS per tonne.
    pub conversion_factor: Decimal,
    /// Unit price.
    pub price: Decimal,
    /// Ticket value.
    pub total_value: Decimal,
}

/// A ticket as submitted by the log editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesTicketInput {
    /// Existing ticket id; a new one is assigned when absent.
    #[serde(default)]
    pub id: Option<SaleId>,
    /// Sale date.
    pub date: NaiveDate,
    /// Weighbridge ticket number.
    #[serde(default)]
    pub ticket_number: String,
    /// Buyer.
    #[serde(default)]
    pub customer: String,
    /// `Domestic` or `Export`.
    #[serde(default)]
    pub market: String,
    /// Grade code, resolved against the product grades.
    #[serde(default)]
    pub grade_code: Option<String>,
    /// Net tonnes.
    #[serde(default)]
    pub net_tonnes: Decimal,
    /// JAS cubic metres.
    #[serde(default)]
    pub jas: Decimal,
    /// Unit price.
    #[serde(default)]
    pub price: Decimal,
    /// Ticket value.
    #[serde(default)]
    pub total_value: Decimal,
}

/// Repository trait for sales tickets.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait SalesRepository: Send + Sync {
    /// Most recent tickets of a forest, date descending.
    fn list_recent(
        &self,
        forest_id: ForestId,
        limit: u64,
    ) -> impl Future<Output = Result<Vec<SalesTicket>, SalesError>> + Send;

    /// Insert or overwrite tickets by id.
    fn upsert(
        &self,
        tickets: Vec<SalesTicket>,
    ) -> impl Future<Output = Result<u64, SalesError>> + Send;
}

/// Sales log service.
pub struct SalesService<R: SalesRepository> {
    repo: Arc<R>,
}

impl<R: SalesRepository> SalesService<R> {
    /// Create a new sales service.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// The latest tickets of a forest.
    pub async fn recent(&self, forest_id: ForestId) -> Result<Vec<SalesTicket>, SalesError> {
        self.repo.list_recent(forest_id, RECENT_TICKET_LIMIT).await
    }

    /// Save a batch of tickets.
    pub async fn save(
        &self,
        forest_id: ForestId,
        inputs: Vec<SalesTicketInput>,
        grades: &[DimensionMember],
    ) -> Result<u64, SalesError> {
        if inputs.is_empty() {
            return Ok(0);
        }

        let tickets = prepare_tickets(forest_id, inputs, grades);
        let saved = self.repo.upsert(tickets).await?;
        info!(forest_id = %forest_id, rows = saved, "Sales tickets saved");
        Ok(saved)
    }
}

/// Resolve grades, recompute conversion factors and assign ids.
///
/// Unknown grade codes leave the grade empty.
#[must_use]
pub fn prepare_tickets(
    forest_id: ForestId,
    inputs: Vec<SalesTicketInput>,
    grades: &[DimensionMember],
) -> Vec<SalesTicket> {
    let by_code: HashMap<&str, &DimensionMember> = grades
        .iter()
        .filter_map(|g| g.grade_code.as_deref().map(|code| (code.trim(), g)))
        .collect();

    inputs
        .into_iter()
        .map(|input| {
            let grade = input
                .grade_code
                .as_deref()
                .and_then(|code| by_code.get(code.trim()).copied());

            SalesTicket {
                id: input.id.unwrap_or_default(),
                forest_id,
                date: input.date,
                ticket_number: input.ticket_number,
                customer: input.customer,
                market: input.market,
                grade_id: grade.map(|g| GradeId::new(g.id)),
                grade_code: grade.and_then(|g| g.grade_code.clone()),
                net_tonnes: input.net_tonnes,
                jas: input.jas,
                conversion_factor: conversion_factor(input.jas, input.net_tonnes),
                price: input.price,
                total_value: input.total_value,
            }
        })
        .collect()
}
