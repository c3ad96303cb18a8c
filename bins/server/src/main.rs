//! Timberline API Server
//!
//! Main entry point for the Timberline backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timberline_api::{AppState, create_router};
use timberline_core::extraction::{DocumentExtractor, GeminiExtractor};
use timberline_core::storage::{StorageConfig, StorageService};
use timberline_db::connect_with_config;
use timberline_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timberline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect_with_config(&config.database).await?;
    info!("Connected to database");

    // Object storage for the invoice archive
    let storage = match &config.storage {
        Some(settings) => {
            let storage = StorageService::from_config(StorageConfig::from_settings(settings)?)?;
            info!(
                provider = storage.provider_name(),
                bucket = %settings.bucket,
                "Storage service configured"
            );
            Some(Arc::new(storage))
        }
        None => {
            warn!("Storage is not configured; invoice archiving is disabled");
            None
        }
    };

    // AI extraction for the invoice bot
    let extractor: Option<Arc<dyn DocumentExtractor>> = match &config.extraction {
        Some(settings) => match GeminiExtractor::from_config(settings) {
            Ok(extractor) => {
                info!(model = %settings.model, "Invoice extraction configured");
                Some(Arc::new(extractor))
            }
            Err(e) => {
                warn!(error = %e, "Invoice extraction is disabled");
                None
            }
        },
        None => {
            warn!("Extraction is not configured; invoice bot is disabled");
            None
        }
    };

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage,
        extractor,
        invoice: Arc::new(config.invoice.clone()),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
