//! Grid read/write service.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use tracing::{debug, info};

use super::error::GridError;
use super::schema::{FactSchema, Measures};
use super::types::{DimensionMember, FactRecord, GridEdit, GridKey, GridRow};

/// Storage for one fact table and its dimension.
///
/// This trait is implemented by the db crate to provide actual database operations.
pub trait FactStore<S: FactSchema>: Send + Sync {
    /// Load every member of the schema's dimension, in display order.
    fn load_dimensions(&self) -> impl Future<Output = Result<Vec<DimensionMember>, GridError>> + Send;

    /// Load the facts stored for a grid key.
    fn load_facts(
        &self,
        key: GridKey,
    ) -> impl Future<Output = Result<Vec<FactRecord<S::Measures>>, GridError>> + Send;

    /// Insert or overwrite facts keyed by (forest, dimension, month, record type).
    ///
    /// Returns the number of records submitted.
    fn upsert_facts(
        &self,
        records: Vec<FactRecord<S::Measures>>,
    ) -> impl Future<Output = Result<u64, GridError>> + Send;
}

/// Left-joins dimension members to facts.
///
/// Produces exactly one row per member, in member order, with zero measures
/// where no fact exists. Facts for unknown members are dropped.
#[must_use]
pub fn pivot<S: FactSchema>(
    members: &[DimensionMember],
    facts: Vec<FactRecord<S::Measures>>,
) -> Vec<GridRow<S::Measures>> {
    let mut by_dimension: HashMap<i32, S::Measures> = facts
        .into_iter()
        .map(|fact| (fact.dimension_id, fact.measures))
        .collect();

    members
        .iter()
        .map(|member| {
            let measures = by_dimension.remove(&member.id).unwrap_or_default();
            GridRow {
                dimension_id: member.id,
                label: member.display_name(S::LABEL),
                grade_code: member.grade_code.clone(),
                annotations: S::annotate(member, &measures),
                measures,
            }
        })
        .collect()
}

/// Turns edited rows into fact records for one grid key.
///
/// When the same dimension id appears more than once, the last row wins.
#[must_use]
pub fn flatten_rows<M: Measures>(key: GridKey, rows: Vec<GridEdit<M>>) -> Vec<FactRecord<M>> {
    let mut order = Vec::with_capacity(rows.len());
    let mut latest: HashMap<i32, M> = HashMap::with_capacity(rows.len());

    for row in rows {
        if latest.insert(row.dimension_id, row.measures).is_none() {
            order.push(row.dimension_id);
        }
    }

    order
        .into_iter()
        .filter_map(|dimension_id| {
            latest.remove(&dimension_id).map(|measures| FactRecord {
                forest_id: key.forest_id,
                dimension_id,
                month: key.month,
                record_type: key.record_type,
                measures,
            })
        })
        .collect()
}

/// Reads and saves monthly grids for one fact schema.
pub struct GridService<S: FactSchema, R: FactStore<S>> {
    store: Arc<R>,
    _schema: PhantomData<S>,
}

impl<S: FactSchema, R: FactStore<S>> GridService<S, R> {
    /// Create a new grid service.
    #[must_use]
    pub fn new(store: Arc<R>) -> Self {
        Self {
            store,
            _schema: PhantomData,
        }
    }

    /// Load the zero-filled grid for a key.
    ///
    /// An empty dimension table yields an empty grid.
    pub async fn load(&self, key: GridKey) -> Result<Vec<GridRow<S::Measures>>, GridError> {
        let members = self.store.load_dimensions().await?;
        if members.is_empty() {
            debug!(table = S::DIMENSION_TABLE, "Dimension table is empty");
            return Ok(Vec::new());
        }

        let facts = self.store.load_facts(key).await?;
        debug!(
            table = S::TABLE,
            forest_id = %key.forest_id,
            month = %key.month,
            members = members.len(),
            facts = facts.len(),
            "Pivoting monthly facts"
        );

        Ok(pivot::<S>(&members, facts))
    }

    /// Save edited rows for a key as one bulk upsert.
    ///
    /// Empty input is a successful no-op. Rows referencing an unknown
    /// dimension id reject the whole batch before anything is written.
    pub async fn save(&self, key: GridKey, rows: Vec<GridEdit<S::Measures>>) -> Result<u64, GridError> {
        if rows.is_empty() {
            return Ok(0);
        }

        let known: HashSet<i32> = self
            .store
            .load_dimensions()
            .await?
            .into_iter()
            .map(|member| member.id)
            .collect();

        if let Some(unknown) = rows.iter().find(|row| !known.contains(&row.dimension_id)) {
            return Err(GridError::UnknownDimension {
                dimension: S::DIMENSION_ID_COLUMN,
                id: unknown.dimension_id,
            });
        }

        let records = flatten_rows(key, rows);
        let saved = self.store.upsert_facts(records).await?;

        info!(
            table = S::TABLE,
            forest_id = %key.forest_id,
            month = %key.month,
            record_type = %key.record_type,
            rows = saved,
            "Grid saved"
        );

        Ok(saved)
    }
}
