//! Integration tests for the sales ticket repository.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use timberline_core::sales::{SalesRepository as _, SalesService, SalesTicketInput};
use timberline_db::{DimensionRepository, SalesRepository};
use timberline_shared::types::{ForestId, GradeId};

fn ticket(day: u32, ticket_number: &str, grade: Option<&str>) -> SalesTicketInput {
    SalesTicketInput {
        id: None,
        date: NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date"),
        ticket_number: ticket_number.to_string(),
        customer: "FCO".to_string(),
        market: "Export".to_string(),
        grade_code: grade.map(str::to_string),
        net_tonnes: dec!(25),
        jas: dec!(30),
        price: dec!(150),
        total_value: dec!(4500),
    }
}

#[tokio::test]
async fn test_save_resolves_grade_and_lists_newest_first() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let grades = DimensionRepository::new(db.clone())
        .list_grades()
        .await
        .expect("Failed to list grades");
    let service = SalesService::new(Arc::new(SalesRepository::new(db)));
    let forest = ForestId::new(ids.forest);

    let saved = service
        .save(
            forest,
            vec![
                ticket(3, "T-1", Some("A Export")),
                ticket(14, "T-2", Some("Unknown grade")),
            ],
            &grades,
        )
        .await
        .expect("Failed to save tickets");
    assert_eq!(saved, 2);

    let recent = service.recent(forest).await.expect("Failed to list tickets");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].ticket_number, "T-2");
    assert_eq!(recent[0].grade_id, None);
    assert_eq!(recent[1].ticket_number, "T-1");
    assert_eq!(recent[1].grade_id, Some(GradeId::new(ids.grade_export)));
    assert_eq!(recent[1].grade_code.as_deref(), Some("A Export"));
    assert_eq!(recent[1].conversion_factor, dec!(1.2));

    let other = service
        .recent(ForestId::new(ids.other_forest))
        .await
        .expect("Failed to list tickets");
    assert!(other.is_empty());
}

#[tokio::test]
async fn test_save_with_existing_id_overwrites() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let repo = Arc::new(SalesRepository::new(db));
    let service = SalesService::new(Arc::clone(&repo));
    let forest = ForestId::new(ids.forest);

    service
        .save(forest, vec![ticket(5, "T-9", None)], &[])
        .await
        .expect("Failed to save ticket");
    let first = service.recent(forest).await.expect("Failed to list tickets");

    let mut edited = ticket(5, "T-9b", None);
    edited.id = Some(first[0].id);
    edited.net_tonnes = Decimal::ZERO;
    service
        .save(forest, vec![edited], &[])
        .await
        .expect("Failed to save ticket");

    let recent = repo.list_recent(forest, 50).await.expect("Failed to list tickets");
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].id, first[0].id);
    assert_eq!(recent[0].ticket_number, "T-9b");
    assert_eq!(recent[0].conversion_factor, Decimal::ZERO);
}

#[tokio::test]
async fn test_list_is_capped() {
    let db = common::setup().await;
    let ids = common::seed(&db).await;
    let repo = SalesRepository::new(db);
    let forest = ForestId::new(ids.forest);
    let service = SalesService::new(Arc::new(repo.clone()));

    let batch: Vec<_> = (1..=28)
        .map(|day| ticket(day, &format!("T-{day}"), None))
        .collect();
    service.save(forest, batch, &[]).await.expect("Failed to save tickets");

    let limited = repo.list_recent(forest, 5).await.expect("Failed to list tickets");
    assert_eq!(limited.len(), 5);
    assert_eq!(limited[0].ticket_number, "T-28");
}
