//! Connectivity report for the document store

use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::repository::DocumentStore;
use crate::service::CatalogService;

/// Maximum number of collection names included in a report
const MAX_REPORTED_COLLECTIONS: usize = 10;
/// Store error details are cut to this many characters
const MAX_ERROR_CHARS: usize = 80;

/// Free-form connectivity and configuration report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConnectivityReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

impl Default for ConnectivityReport {
    fn default() -> Self {
        Self {
            backend: "✅ Running".to_string(),
            database: "❌ Not Available".to_string(),
            database_url: "❌ Not Set".to_string(),
            database_name: "❌ Not Set".to_string(),
            connection_status: "Not Connected".to_string(),
            collections: Vec::new(),
        }
    }
}

impl<D: DocumentStore> CatalogService<D> {
    /// Probe the store by listing its collections.
    ///
    /// Never fails: an uninitialized store and a failing probe are both
    /// reported in the returned text fields.
    #[instrument(skip(self))]
    pub async fn connectivity_report(&self, database_url_set: bool) -> ConnectivityReport {
        let mut report = ConnectivityReport {
            database_url: if database_url_set {
                "✅ Set".to_string()
            } else {
                "❌ Not Set".to_string()
            },
            ..Default::default()
        };

        let Some(database_name) = self.database_name() else {
            report.database = "⚠️ Available but not initialized".to_string();
            return report;
        };

        report.database = "✅ Available".to_string();
        report.database_name = database_name;

        match self.collection_names().await {
            Ok(mut collections) => {
                collections.truncate(MAX_REPORTED_COLLECTIONS);
                report.collections = collections;
                report.database = "✅ Connected & Working".to_string();
                report.connection_status = "Connected".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, "Database connectivity probe failed");
                let detail: String = e.detail().chars().take(MAX_ERROR_CHARS).collect();
                report.database = format!("⚠️ Connected but Error: {}", detail);
            }
        }

        report
    }
}
