//! Integration tests for monthly fact grids.

mod common;

use std::sync::Arc;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use timberline_core::grid::{
    CostMeasures, GridEdit, GridError, GridKey, GridService, OperationalCost, ProductionMeasures,
    ProductionVolume,
};
use timberline_db::FactRepository;
use timberline_db::entities::{fact_operational_costs, fact_production_volume};
use timberline_shared::types::{ForestId, Month, RecordType};

fn march(forest: i32, record_type: RecordType) -> GridKey {
    GridKey::new(
        ForestId::new(forest),
        Month::new(2025, 3).expect("valid month"),
        record_type,
    )
}

fn production(tonnes: Decimal, jas: Decimal, price: Decimal, amount: Decimal) -> ProductionMeasures {
    ProductionMeasures {
        vol_tonnes: tonnes,
        vol_jas: jas,
        price_jas: price,
        amount,
    }
}

#[tokio::test]
async fn test_empty_month_returns_zero_filled_grid() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<ProductionVolume, _> =
        GridService::new(Arc::new(FactRepository::new(db)));

    let rows = service
        .load(march(ids.forest, RecordType::Budget))
        .await
        .expect("Failed to load grid");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.measures == ProductionMeasures::default()));
    assert_eq!(rows[0].label, "A Export");
    assert_eq!(rows[0].annotations.market.as_deref(), Some("Export"));
    assert_eq!(rows[1].annotations.market.as_deref(), Some("Domestic"));
    assert_eq!(rows[1].annotations.customer.as_deref(), Some("FCO"));
}

#[tokio::test]
async fn test_empty_dimension_table_returns_empty_grid() {
    let db = common::setup().await;
    let service: GridService<OperationalCost, _> =
        GridService::new(Arc::new(FactRepository::new(db)));

    let rows = service
        .load(march(1, RecordType::Actual))
        .await
        .expect("Failed to load grid");

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_save_then_load_round_trip() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<ProductionVolume, _> =
        GridService::new(Arc::new(FactRepository::new(db)));
    let key = march(ids.forest, RecordType::Actual);

    let saved = service
        .save(
            key,
            vec![GridEdit {
                dimension_id: ids.grade_export,
                measures: production(dec!(250), dec!(300), dec!(150), dec!(45000)),
            }],
        )
        .await
        .expect("Failed to save grid");
    assert_eq!(saved, 1);

    let rows = service.load(key).await.expect("Failed to load grid");
    assert_eq!(rows.len(), 2);

    let export = rows
        .iter()
        .find(|r| r.dimension_id == ids.grade_export)
        .expect("export row");
    assert_eq!(export.measures.vol_tonnes, dec!(250));
    assert_eq!(export.measures.vol_jas, dec!(300));
    assert_eq!(export.measures.amount, dec!(45000));
    assert_eq!(export.annotations.conversion_factor, Some(dec!(1.2)));

    let domestic = rows
        .iter()
        .find(|r| r.dimension_id == ids.grade_domestic)
        .expect("domestic row");
    assert_eq!(domestic.measures, ProductionMeasures::default());
}

#[tokio::test]
async fn test_repeated_save_overwrites_single_row() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<OperationalCost, _> =
        GridService::new(Arc::new(FactRepository::new(db.clone())));
    let key = march(ids.forest, RecordType::Actual);

    for total in [dec!(5000), dec!(5000.5)] {
        service
            .save(
                key,
                vec![GridEdit {
                    dimension_id: ids.harvesting,
                    measures: CostMeasures {
                        quantity: dec!(1),
                        unit_rate: total,
                        total_amount: total,
                    },
                }],
            )
            .await
            .expect("Failed to save grid");
    }

    let stored = fact_operational_costs::Entity::find()
        .count(&db)
        .await
        .expect("Failed to count facts");
    assert_eq!(stored, 1);

    let rows = service.load(key).await.expect("Failed to load grid");
    let harvesting = rows
        .iter()
        .find(|r| r.dimension_id == ids.harvesting)
        .expect("harvesting row");
    assert_eq!(harvesting.measures.total_amount, dec!(5000.5));
    assert_eq!(harvesting.annotations.category.as_deref(), Some("Harvest"));
}

#[tokio::test]
async fn test_duplicate_rows_in_one_batch_keep_last() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<ProductionVolume, _> =
        GridService::new(Arc::new(FactRepository::new(db.clone())));
    let key = march(ids.forest, RecordType::Budget);

    let saved = service
        .save(
            key,
            vec![
                GridEdit {
                    dimension_id: ids.grade_export,
                    measures: production(dec!(1), dec!(1), dec!(1), dec!(1)),
                },
                GridEdit {
                    dimension_id: ids.grade_export,
                    measures: production(dec!(2), dec!(2), dec!(2), dec!(2)),
                },
            ],
        )
        .await
        .expect("Failed to save grid");
    assert_eq!(saved, 1);

    let rows = fact_production_volume::Entity::find()
        .all(&db)
        .await
        .expect("Failed to read facts");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].amount, dec!(2));
}

#[tokio::test]
async fn test_keys_are_isolated_by_record_type_and_forest() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<ProductionVolume, _> =
        GridService::new(Arc::new(FactRepository::new(db)));

    service
        .save(
            march(ids.forest, RecordType::Budget),
            vec![GridEdit {
                dimension_id: ids.grade_export,
                measures: production(dec!(10), dec!(12), dec!(100), dec!(1200)),
            }],
        )
        .await
        .expect("Failed to save grid");

    for key in [
        march(ids.forest, RecordType::Actual),
        march(ids.other_forest, RecordType::Budget),
    ] {
        let rows = service.load(key).await.expect("Failed to load grid");
        assert!(rows.iter().all(|r| r.measures == ProductionMeasures::default()));
    }
}

#[tokio::test]
async fn test_unknown_dimension_is_rejected_before_write() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<OperationalCost, _> =
        GridService::new(Arc::new(FactRepository::new(db.clone())));

    let err = service
        .save(
            march(ids.forest, RecordType::Actual),
            vec![GridEdit {
                dimension_id: 9999,
                measures: CostMeasures::default(),
            }],
        )
        .await
        .expect_err("unknown activity should fail");

    assert!(matches!(err, GridError::UnknownDimension { id: 9999, .. }));
    let stored = fact_operational_costs::Entity::find()
        .count(&db)
        .await
        .expect("Failed to count facts");
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_empty_save_is_a_no_op() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let service: GridService<OperationalCost, _> =
        GridService::new(Arc::new(FactRepository::new(db)));

    let saved = service
        .save(march(ids.forest, RecordType::Actual), Vec::new())
        .await
        .expect("Failed to save grid");

    assert_eq!(saved, 0);
}
