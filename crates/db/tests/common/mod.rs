//! Shared setup for repository integration tests.

#![allow(dead_code)]

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use timberline_db::DimensionRepository;
use timberline_db::migration::{Migrator, MigratorTrait};

/// Fresh in-memory database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory database.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to open in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Ids of the seeded reference rows.
pub struct Seeded {
    pub forest: i32,
    pub other_forest: i32,
    pub grade_export: i32,
    pub grade_domestic: i32,
    pub harvesting: i32,
    pub cartage: i32,
}

/// Two forests, two grades and two cost activities.
pub async fn seed(db: &DatabaseConnection) -> Seeded {
    let repo = DimensionRepository::new(db.clone());

    let forest = repo.create_forest("Kaweka").await.expect("forest");
    let other_forest = repo.create_forest("Esk Valley").await.expect("forest");
    let grade_export = repo.create_grade("A Export", Some("A grade")).await.expect("grade");
    let grade_domestic = repo
        .create_grade("S Domestic", Some("Sawlog domestic"))
        .await
        .expect("grade");
    let harvesting = repo
        .create_activity("Harvesting - Smith Logging Ltd", Some("Harvest"))
        .await
        .expect("activity");
    let cartage = repo
        .create_activity("Cartage - Hawkes Bay Transport", Some("Logistics"))
        .await
        .expect("activity");

    Seeded {
        forest: forest.id,
        other_forest: other_forest.id,
        grade_export: grade_export.id,
        grade_domestic: grade_domestic.id,
        harvesting: harvesting.id,
        cartage: cartage.id,
    }
}
