//! Sales ticket repository.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use timberline_core::sales::{SalesError, SalesRepository as SalesRepoTrait, SalesTicket};
use timberline_shared::types::{ForestId, GradeId, SaleId};

use crate::entities::{actual_sales_transactions, dim_products};

/// Sales ticket repository implementation.
#[derive(Debug, Clone)]
pub struct SalesRepository {
    db: DatabaseConnection,
}

impl SalesRepository {
    /// Create a new sales repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl SalesRepoTrait for SalesRepository {
    async fn list_recent(
        &self,
        forest_id: ForestId,
        limit: u64,
    ) -> Result<Vec<SalesTicket>, SalesError> {
        let rows = actual_sales_transactions::Entity::find()
            .filter(actual_sales_transactions::Column::ForestId.eq(forest_id.into_inner()))
            .order_by_desc(actual_sales_transactions::Column::Date)
            .order_by_desc(actual_sales_transactions::Column::CreatedAt)
            .limit(limit)
            .find_also_related(dim_products::Entity)
            .all(&self.db)
            .await
            .map_err(|e| SalesError::Repository(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(sale, grade)| model_to_ticket(sale, grade))
            .collect())
    }

    async fn upsert(&self, tickets: Vec<SalesTicket>) -> Result<u64, SalesError> {
        if tickets.is_empty() {
            return Ok(0);
        }
        let count = u64::try_from(tickets.len()).unwrap_or(u64::MAX);
        let now = Utc::now();

        let models = tickets
            .into_iter()
            .map(|ticket| actual_sales_transactions::ActiveModel {
                id: Set(ticket.id.into_inner()),
                forest_id: Set(ticket.forest_id.into_inner()),
                date: Set(ticket.date),
                ticket_number: Set(ticket.ticket_number),
                customer: Set(ticket.customer),
                market: Set(ticket.market),
                grade_id: Set(ticket.grade_id.map(GradeId::into_inner)),
                net_tonnes: Set(ticket.net_tonnes),
                jas: Set(ticket.jas),
                conversion_factor: Set(ticket.conversion_factor),
                price: Set(ticket.price),
                total_value: Set(ticket.total_value),
                created_at: Set(now.into()),
            });

        actual_sales_transactions::Entity::insert_many(models)
            .on_conflict(
                OnConflict::column(actual_sales_transactions::Column::Id)
                    .update_columns([
                        actual_sales_transactions::Column::Date,
                        actual_sales_transactions::Column::TicketNumber,
                        actual_sales_transactions::Column::Customer,
                        actual_sales_transactions::Column::Market,
                        actual_sales_transactions::Column::GradeId,
                        actual_sales_transactions::Column::NetTonnes,
                        actual_sales_transactions::Column::Jas,
                        actual_sales_transactions::Column::ConversionFactor,
                        actual_sales_transactions::Column::Price,
                        actual_sales_transactions::Column::TotalValue,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| SalesError::Repository(e.to_string()))?;

        Ok(count)
    }
}

fn model_to_ticket(
    model: actual_sales_transactions::Model,
    grade: Option<dim_products::Model>,
) -> SalesTicket {
    SalesTicket {
        id: SaleId::from_uuid(model.id),
        forest_id: ForestId::new(model.forest_id),
        date: model.date,
        ticket_number: model.ticket_number,
        customer: model.customer,
        market: model.market,
        grade_id: model.grade_id.map(GradeId::new),
        grade_code: grade.map(|g| g.grade_code),
        net_tonnes: model.net_tonnes,
        jas: model.jas,
        conversion_factor: model.conversion_factor,
        price: model.price,
        total_value: model.total_value,
    }
}
