//! Application state management.
//!
//! This module defines the shared application state passed to all request handlers.
//! The state contains:
//! - Configuration
//! - Catalog service over the MongoDB document store

use domain_catalog::{CatalogService, MongoDocumentStore};

/// Shared application state.
///
/// This struct is cloned for each handler (inexpensive Arc clones), providing access to:
/// - Application configuration
/// - The catalog service, possibly without an initialized store
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Catalog service (cloneable, shares the underlying connection pool)
    pub catalog: CatalogService<MongoDocumentStore>,
}
