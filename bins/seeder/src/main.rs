//! Reference data seeder for Timberline development and testing.
//!
//! Seeds forests, log product grades and operational cost activities.
//! Each table is only seeded when it is empty.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use timberline_db::DimensionRepository;

const FORESTS: &[&str] = &["Kaweka Forest", "Esk Valley Forest", "Mohaka Forest"];

const GRADES: &[(&str, &str)] = &[
    ("A", "A grade export sawlog"),
    ("K", "K grade export sawlog"),
    ("KI", "KI grade export sawlog"),
    ("S1 Domestic", "Structural sawlog, domestic mill"),
    ("Pulp Domestic", "Pulp log, domestic mill"),
];

const ACTIVITIES: &[(&str, &str)] = &[
    ("Harvesting", "Harvest"),
    ("Cartage", "Logistics"),
    ("Marshalling", "Logistics"),
    ("Port Costs", "Logistics"),
    ("Roading", "Infrastructure"),
    ("Silviculture", "Forest Management"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    println!("Connecting to database...");
    let db = timberline_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = DimensionRepository::new(db);

    println!("Seeding forests...");
    if repo.list_forests().await?.is_empty() {
        for name in FORESTS {
            repo.create_forest(name).await?;
        }
    } else {
        println!("  Forests already exist, skipping...");
    }

    println!("Seeding product grades...");
    if repo.list_grades().await?.is_empty() {
        for &(code, name) in GRADES {
            repo.create_grade(code, Some(name)).await?;
        }
    } else {
        println!("  Grades already exist, skipping...");
    }

    println!("Seeding cost activities...");
    if repo.list_activities().await?.is_empty() {
        for &(name, category) in ACTIVITIES {
            repo.create_activity(name, Some(category)).await?;
        }
    } else {
        println!("  Activities already exist, skipping...");
    }

    println!("Seeding complete!");
    Ok(())
}
