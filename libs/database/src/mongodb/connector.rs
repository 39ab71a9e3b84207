use mongodb::{Client, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::MongoConfig;

/// Error type for MongoDB operations
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}

/// Build a MongoDB client from a MongoConfig without contacting the server.
///
/// The driver connects on first use, so an unreachable server surfaces as an
/// error on the first operation rather than here. Only a malformed
/// connection string (or an SRV lookup failure) fails construction.
///
/// # Example
/// ```ignore
/// use database::mongodb::{MongoConfig, client_from_config};
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "mydb");
/// let client = client_from_config(&config).await?;
/// ```
pub async fn client_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(
        url = %config.redacted_url(),
        database = %config.database,
        "Creating MongoDB client"
    );

    let mut options = ClientOptions::parse(&config.url).await?;

    options.app_name = config.app_name.clone();
    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    let client = Client::with_options(options)?;
    Ok(client)
}
