//! Grid pivot and upsert tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use timberline_shared::types::{ForestId, Month, RecordType};

use super::*;

type StoreKey = (i32, i32, Month, RecordType);

/// Fact store backed by ordered maps.
struct MemoryStore<M> {
    members: Vec<DimensionMember>,
    facts: Mutex<BTreeMap<StoreKey, M>>,
    upserts: Mutex<u32>,
}

impl<M> MemoryStore<M> {
    fn new(members: Vec<DimensionMember>) -> Self {
        Self {
            members,
            facts: Mutex::new(BTreeMap::new()),
            upserts: Mutex::new(0),
        }
    }
}

impl<S: FactSchema> FactStore<S> for MemoryStore<S::Measures> {
    async fn load_dimensions(&self) -> Result<Vec<DimensionMember>, GridError> {
        Ok(self.members.clone())
    }

    async fn load_facts(&self, key: GridKey) -> Result<Vec<FactRecord<S::Measures>>, GridError> {
        let facts = self.facts.lock().unwrap();
        Ok(facts
            .iter()
            .filter(|((forest, _, month, record_type), _)| {
                *forest == key.forest_id.into_inner()
                    && *month == key.month
                    && *record_type == key.record_type
            })
            .map(|((forest, dimension_id, month, record_type), measures)| FactRecord {
                forest_id: ForestId::new(*forest),
                dimension_id: *dimension_id,
                month: *month,
                record_type: *record_type,
                measures: measures.clone(),
            })
            .collect())
    }

    async fn upsert_facts(&self, records: Vec<FactRecord<S::Measures>>) -> Result<u64, GridError> {
        *self.upserts.lock().unwrap() += 1;
        let mut facts = self.facts.lock().unwrap();
        let count = records.len() as u64;
        for record in records {
            facts.insert(
                (
                    record.forest_id.into_inner(),
                    record.dimension_id,
                    record.month,
                    record.record_type,
                ),
                record.measures,
            );
        }
        Ok(count)
    }
}

fn activities() -> Vec<DimensionMember> {
    vec![
        DimensionMember {
            id: 1,
            activity_name: Some("Harvesting".into()),
            category: Some("Harvest".into()),
            ..DimensionMember::default()
        },
        DimensionMember {
            id: 2,
            activity_name: Some("Roading".into()),
            category: Some("Infrastructure".into()),
            ..DimensionMember::default()
        },
        DimensionMember {
            id: 3,
            activity_name: Some("Cartage".into()),
            category: Some("Logistics".into()),
            ..DimensionMember::default()
        },
    ]
}

fn grades() -> Vec<DimensionMember> {
    vec![
        DimensionMember {
            id: 10,
            grade_code: Some("A Export".into()),
            ..DimensionMember::default()
        },
        DimensionMember {
            id: 11,
            grade_code: Some("KI Domestic".into()),
            ..DimensionMember::default()
        },
    ]
}

fn key() -> GridKey {
    GridKey::new(
        ForestId::new(1),
        Month::new(2025, 3).unwrap(),
        RecordType::Actual,
    )
}

fn cost(quantity: Decimal, unit_rate: Decimal, total_amount: Decimal) -> CostMeasures {
    CostMeasures {
        quantity,
        unit_rate,
        total_amount,
    }
}

#[tokio::test]
async fn test_load_without_facts_is_zero_filled_skeleton() {
    let service: GridService<OperationalCost, _> =
        GridService::new(Arc::new(MemoryStore::new(activities())));

    let rows = service.load(key()).await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(
        rows.iter().map(|r| r.label.as_str()).collect::<Vec<_>>(),
        vec!["Harvesting", "Roading", "Cartage"]
    );
    assert!(rows.iter().all(|r| r.measures == CostMeasures::default()));
    assert_eq!(rows[1].annotations.category.as_deref(), Some("Infrastructure"));
}

#[tokio::test]
async fn test_load_with_empty_dimension_is_empty_grid() {
    let service: GridService<OperationalCost, _> =
        GridService::new(Arc::new(MemoryStore::new(Vec::new())));

    assert!(service.load(key()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_save_then_load_round_trips_measures() {
    let store = Arc::new(MemoryStore::new(activities()));
    let service: GridService<OperationalCost, _> = GridService::new(Arc::clone(&store));

    let edits = vec![GridEdit {
        dimension_id: 2,
        measures: cost(dec!(4), dec!(1250), dec!(5000)),
    }];
    assert_eq!(service.save(key(), edits).await.unwrap(), 1);

    let rows = service.load(key()).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].measures, CostMeasures::default());
    assert_eq!(rows[1].measures, cost(dec!(4), dec!(1250), dec!(5000)));
    assert_eq!(rows[2].measures, CostMeasures::default());
}

#[tokio::test]
async fn test_save_same_record_twice_keeps_one_row() {
    let store = Arc::new(MemoryStore::new(activities()));
    let service: GridService<OperationalCost, _> = GridService::new(Arc::clone(&store));

    for _ in 0..2 {
        let edits = vec![GridEdit {
            dimension_id: 1,
            measures: cost(dec!(1), dec!(100), dec!(100)),
        }];
        service.save(key(), edits).await.unwrap();
    }

    assert_eq!(store.facts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_empty_is_noop() {
    let store = Arc::new(MemoryStore::new(activities()));
    let service: GridService<OperationalCost, _> = GridService::new(Arc::clone(&store));

    assert_eq!(service.save(key(), Vec::new()).await.unwrap(), 0);
    assert_eq!(*store.upserts.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_save_rejects_unknown_dimension() {
    let store = Arc::new(MemoryStore::new(activities()));
    let service: GridService<OperationalCost, _> = GridService::new(Arc::clone(&store));

    let edits = vec![
        GridEdit {
            dimension_id: 1,
            measures: cost(dec!(1), dec!(1), dec!(1)),
        },
        GridEdit {
            dimension_id: 99,
            measures: cost(dec!(1), dec!(1), dec!(1)),
        },
    ];
    let err = service.save(key(), edits).await.unwrap_err();

    assert!(matches!(
        err,
        GridError::UnknownDimension {
            dimension: "activity_id",
            id: 99
        }
    ));
    assert!(store.facts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_facts_are_isolated_by_record_type() {
    let store = Arc::new(MemoryStore::new(activities()));
    let service: GridService<OperationalCost, _> = GridService::new(Arc::clone(&store));

    let budget = GridKey::new(key().forest_id, key().month, RecordType::Budget);
    let edits = vec![GridEdit {
        dimension_id: 3,
        measures: cost(dec!(2), dec!(50), dec!(100)),
    }];
    service.save(budget, edits).await.unwrap();

    let actual_rows = service.load(key()).await.unwrap();
    assert!(actual_rows.iter().all(|r| r.measures.total_amount.is_zero()));
    let budget_rows = service.load(budget).await.unwrap();
    assert_eq!(budget_rows[2].measures.total_amount, dec!(100));
}

#[test]
fn test_production_rows_carry_market_customer_and_conversion() {
    let facts = vec![FactRecord {
        forest_id: ForestId::new(1),
        dimension_id: 10,
        month: key().month,
        record_type: RecordType::Actual,
        measures: ProductionMeasures {
            vol_tonnes: dec!(200),
            vol_jas: dec!(250),
            price_jas: dec!(140),
            amount: dec!(35000),
        },
    }];

    let rows = pivot::<ProductionVolume>(&grades(), facts);

    assert_eq!(rows[0].label, "A Export");
    assert_eq!(rows[0].annotations.market.as_deref(), Some("Export"));
    assert_eq!(rows[0].annotations.customer.as_deref(), Some("FCO"));
    assert_eq!(rows[0].annotations.conversion_factor, Some(dec!(1.25)));
    assert_eq!(rows[1].annotations.market.as_deref(), Some("Domestic"));
    assert_eq!(rows[1].annotations.conversion_factor, Some(Decimal::ZERO));
}

#[test]
fn test_display_name_falls_back_to_activity_name() {
    let member = DimensionMember {
        id: 5,
        activity_name: Some("Pruning".into()),
        ..DimensionMember::default()
    };
    assert_eq!(member.display_name(LabelColumn::GradeCode), "Pruning");
    assert_eq!(member.display_name(LabelColumn::Name), "Pruning");
}

#[test]
fn test_display_name_last_resort_is_id() {
    let member = DimensionMember {
        id: 42,
        ..DimensionMember::default()
    };
    assert_eq!(member.display_name(LabelColumn::ActivityName), "#42");
}

#[test]
fn test_flatten_rows_last_duplicate_wins() {
    let rows = vec![
        GridEdit {
            dimension_id: 1,
            measures: cost(dec!(1), dec!(1), dec!(1)),
        },
        GridEdit {
            dimension_id: 2,
            measures: cost(dec!(2), dec!(2), dec!(4)),
        },
        GridEdit {
            dimension_id: 1,
            measures: cost(dec!(3), dec!(3), dec!(9)),
        },
    ];

    let records = flatten_rows(key(), rows);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].dimension_id, 1);
    assert_eq!(records[0].measures.total_amount, dec!(9));
    assert_eq!(records[1].dimension_id, 2);
    assert!(records.iter().all(|r| r.month == key().month));
}

#[test]
fn test_grid_edit_ignores_extra_columns() {
    let json = r#"{"dimension_id": 3, "label": "Cartage", "quantity": 2, "unit_rate": "12.5", "category": "Logistics"}"#;
    let edit: GridEdit<CostMeasures> = serde_json::from_str(json).unwrap();

    assert_eq!(edit.dimension_id, 3);
    assert_eq!(edit.measures.quantity, dec!(2));
    assert_eq!(edit.measures.unit_rate, dec!(12.5));
    assert_eq!(edit.measures.total_amount, Decimal::ZERO);
}

proptest! {
    /// The pivot always yields one row per dimension member, in order,
    /// whatever subset of members has facts.
    #[test]
    fn prop_pivot_row_count_matches_dimension(
        member_count in 0usize..30,
        fact_mask in proptest::collection::vec(any::<bool>(), 30),
        amounts in proptest::collection::vec(0i64..1_000_000, 30),
    ) {
        let members: Vec<DimensionMember> = (0..member_count)
            .map(|i| DimensionMember {
                id: i32::try_from(i).unwrap() + 1,
                activity_name: Some(format!("Activity {i}")),
                ..DimensionMember::default()
            })
            .collect();

        let facts: Vec<FactRecord<CostMeasures>> = members
            .iter()
            .enumerate()
            .filter(|(i, _)| fact_mask[*i])
            .map(|(i, member)| FactRecord {
                forest_id: ForestId::new(1),
                dimension_id: member.id,
                month: key().month,
                record_type: RecordType::Budget,
                measures: cost(Decimal::ONE, Decimal::from(amounts[i]), Decimal::from(amounts[i])),
            })
            .collect();

        let rows = pivot::<OperationalCost>(&members, facts);

        prop_assert_eq!(rows.len(), members.len());
        for (i, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.dimension_id, members[i].id);
            if fact_mask[i] {
                prop_assert_eq!(row.measures.total_amount, Decimal::from(amounts[i]));
            } else {
                prop_assert_eq!(&row.measures, &CostMeasures::default());
            }
        }
    }
}
