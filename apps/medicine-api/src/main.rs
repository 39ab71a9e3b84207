use axum_helpers::{create_permissive_cors_layer, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::mongodb::{Client, MongoConfig, client_from_config};
use domain_catalog::{CatalogService, MongoDocumentStore};
use std::time::Duration;
use tracing::{error, info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Build the catalog service, falling back to an uninitialized store.
///
/// Never fails: the reason is logged and data routes answer 500 until the
/// process is restarted with a usable configuration.
async fn init_catalog(
    mongodb: Option<&MongoConfig>,
) -> (CatalogService<MongoDocumentStore>, Option<Client>) {
    let Some(mongodb) = mongodb else {
        warn!("DATABASE_URL is not set; starting without a document store");
        return (
            CatalogService::uninitialized("DATABASE_URL is not set"),
            None,
        );
    };

    match client_from_config(mongodb).await {
        Ok(client) => {
            let store = MongoDocumentStore::new(client.database(mongodb.database()));
            info!(database = %mongodb.database(), "Document store initialized");
            (CatalogService::new(store), Some(client))
        }
        Err(e) => {
            error!(error = %e, url = %mongodb.redacted_url(), "Failed to initialize MongoDB client");
            (CatalogService::uninitialized(e.to_string()), None)
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    let (catalog, mongo_client) = init_catalog(config.mongodb.as_ref()).await;
    info!(initialized = catalog.is_initialized(), "Catalog service ready");

    let state = AppState { config, catalog };

    // Build router with API routes, docs and permissive CORS
    let api_routes = api::routes(&state);
    let app = create_router::<openapi::ApiDoc>(api_routes, create_permissive_cors_layer());

    info!("Starting Medicine Distribution API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(client) = mongo_client {
                info!("Shutting down: closing MongoDB connections");
                client.shutdown().await;
                info!("MongoDB connections closed");
            }
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Medicine Distribution API shutdown complete");
    Ok(())
}
