//! Initial database migration.
//!
//! Creates the dimension tables, the two monthly fact tables with their
//! upsert keys, the sales ticket log and the invoice archive. Built with the
//! schema builder so the same migration runs on `PostgreSQL` and `SQLite`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: DIMENSIONS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(DimForests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimForests::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DimForests::Name).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DimProducts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimProducts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DimProducts::GradeCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DimProducts::Name).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DimCostActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DimCostActivities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DimCostActivities::ActivityName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DimCostActivities::Category).string())
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: MONTHLY FACTS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(FactProductionVolume::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FactProductionVolume::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FactProductionVolume::ForestId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FactProductionVolume::GradeId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FactProductionVolume::Month).date().not_null())
                    .col(
                        ColumnDef::new(FactProductionVolume::RecordType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(measure(FactProductionVolume::VolTonnes))
                    .col(measure(FactProductionVolume::VolJas))
                    .col(measure(FactProductionVolume::PriceJas))
                    .col(measure(FactProductionVolume::Amount))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_production_forest")
                            .from(FactProductionVolume::Table, FactProductionVolume::ForestId)
                            .to(DimForests::Table, DimForests::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_production_grade")
                            .from(FactProductionVolume::Table, FactProductionVolume::GradeId)
                            .to(DimProducts::Table, DimProducts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_production_forest_grade_month_type")
                    .table(FactProductionVolume::Table)
                    .col(FactProductionVolume::ForestId)
                    .col(FactProductionVolume::GradeId)
                    .col(FactProductionVolume::Month)
                    .col(FactProductionVolume::RecordType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FactOperationalCosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FactOperationalCosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FactOperationalCosts::ForestId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FactOperationalCosts::ActivityId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(FactOperationalCosts::Month).date().not_null())
                    .col(
                        ColumnDef::new(FactOperationalCosts::RecordType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(measure(FactOperationalCosts::Quantity))
                    .col(measure(FactOperationalCosts::UnitRate))
                    .col(measure(FactOperationalCosts::TotalAmount))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_costs_forest")
                            .from(FactOperationalCosts::Table, FactOperationalCosts::ForestId)
                            .to(DimForests::Table, DimForests::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_costs_activity")
                            .from(FactOperationalCosts::Table, FactOperationalCosts::ActivityId)
                            .to(DimCostActivities::Table, DimCostActivities::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_costs_forest_activity_month_type")
                    .table(FactOperationalCosts::Table)
                    .col(FactOperationalCosts::ForestId)
                    .col(FactOperationalCosts::ActivityId)
                    .col(FactOperationalCosts::Month)
                    .col(FactOperationalCosts::RecordType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: SALES AND ARCHIVE
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(ActualSalesTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActualSalesTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ActualSalesTransactions::ForestId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActualSalesTransactions::Date).date().not_null())
                    .col(
                        ColumnDef::new(ActualSalesTransactions::TicketNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActualSalesTransactions::Customer)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ActualSalesTransactions::Market)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ActualSalesTransactions::GradeId).integer())
                    .col(measure(ActualSalesTransactions::NetTonnes))
                    .col(measure(ActualSalesTransactions::Jas))
                    .col(measure(ActualSalesTransactions::ConversionFactor))
                    .col(measure(ActualSalesTransactions::Price))
                    .col(measure(ActualSalesTransactions::TotalValue))
                    .col(
                        ColumnDef::new(ActualSalesTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_forest")
                            .from(
                                ActualSalesTransactions::Table,
                                ActualSalesTransactions::ForestId,
                            )
                            .to(DimForests::Table, DimForests::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sales_grade")
                            .from(
                                ActualSalesTransactions::Table,
                                ActualSalesTransactions::GradeId,
                            )
                            .to(DimProducts::Table, DimProducts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sales_forest_date")
                    .table(ActualSalesTransactions::Table)
                    .col(ActualSalesTransactions::ForestId)
                    .col(ActualSalesTransactions::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(InvoiceArchive::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InvoiceArchive::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InvoiceArchive::InvoiceNo).string().not_null())
                    .col(ColumnDef::new(InvoiceArchive::Vendor).string().not_null())
                    .col(measure(InvoiceArchive::Amount))
                    .col(ColumnDef::new(InvoiceArchive::FileName).string().not_null())
                    .col(ColumnDef::new(InvoiceArchive::FileUrl).string().not_null())
                    .col(
                        ColumnDef::new(InvoiceArchive::Status)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvoiceArchive::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvoiceArchive::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ActualSalesTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FactOperationalCosts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FactProductionVolume::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DimCostActivities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DimProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DimForests::Table).to_owned())
            .await?;
        Ok(())
    }
}

/// A non-null decimal measure defaulting to zero.
fn measure<T: IntoIden>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(16, 4)
        .not_null()
        .default(0)
        .to_owned()
}

#[derive(DeriveIden)]
enum DimForests {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum DimProducts {
    Table,
    Id,
    GradeCode,
    Name,
}

#[derive(DeriveIden)]
enum DimCostActivities {
    Table,
    Id,
    ActivityName,
    Category,
}

#[derive(DeriveIden)]
enum FactProductionVolume {
    Table,
    Id,
    ForestId,
    GradeId,
    Month,
    RecordType,
    VolTonnes,
    VolJas,
    PriceJas,
    Amount,
}

#[derive(DeriveIden)]
enum FactOperationalCosts {
    Table,
    Id,
    ForestId,
    ActivityId,
    Month,
    RecordType,
    Quantity,
    UnitRate,
    TotalAmount,
}

#[derive(DeriveIden)]
enum ActualSalesTransactions {
    Table,
    Id,
    ForestId,
    Date,
    TicketNumber,
    Customer,
    Market,
    GradeId,
    NetTonnes,
    Jas,
    ConversionFactor,
    Price,
    TotalValue,
    CreatedAt,
}

#[derive(DeriveIden)]
enum InvoiceArchive {
    Table,
    Id,
    InvoiceNo,
    Vendor,
    Amount,
    FileName,
    FileUrl,
    Status,
    CreatedAt,
}
