//! Invoice archive repository.

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use timberline_core::reconciliation::{
    ArchivedInvoice, InvoiceArchiveRepository as ArchiveRepoTrait, ReconciliationError,
};
use timberline_shared::types::ArchiveId;

use crate::entities::invoice_archive;

/// Invoice archive repository implementation.
#[derive(Debug, Clone)]
pub struct InvoiceArchiveRepository {
    db: DatabaseConnection,
}

impl InvoiceArchiveRepository {
    /// Create a new invoice archive repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ArchiveRepoTrait for InvoiceArchiveRepository {
    async fn insert(&self, record: ArchivedInvoice) -> Result<ArchivedInvoice, ReconciliationError> {
        let model = invoice_archive::ActiveModel {
            id: Set(record.id.into_inner()),
            invoice_no: Set(record.invoice_no),
            vendor: Set(record.vendor),
            amount: Set(record.amount),
            file_name: Set(record.file_name),
            file_url: Set(record.file_url),
            status: Set(record.status.into()),
            created_at: Set(record.created_at.into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| ReconciliationError::repository(e.to_string()))?;

        Ok(model_to_archived(model))
    }

    async fn search(
        &self,
        query: Option<String>,
    ) -> Result<Vec<ArchivedInvoice>, ReconciliationError> {
        let mut select = invoice_archive::Entity::find();

        if let Some(query) = query {
            let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
            select = select.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(invoice_archive::Column::Vendor)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(invoice_archive::Column::InvoiceNo)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }

        let models = select
            .order_by_desc(invoice_archive::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| ReconciliationError::repository(e.to_string()))?;

        Ok(models.into_iter().map(model_to_archived).collect())
    }
}

/// Escape `LIKE` wildcards so the query matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn model_to_archived(model: invoice_archive::Model) -> ArchivedInvoice {
    ArchivedInvoice {
        id: ArchiveId::from_uuid(model.id),
        invoice_no: model.invoice_no,
        vendor: model.vendor,
        amount: model.amount,
        file_name: model.file_name,
        file_url: model.file_url,
        status: model.status.into(),
        created_at: model.created_at.with_timezone(&Utc),
    }
}
