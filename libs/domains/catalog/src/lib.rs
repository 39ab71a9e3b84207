//! Catalog Domain
//!
//! Medicine-distribution catalog: products, customers, orders and inquiries,
//! validated at the API boundary and stored as MongoDB documents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, CheckedJson extractor
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Typed validation guard, BSON mapping, id stringification
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← DocumentStore trait + MongoDB implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Schema    │  ← Static entity registry, models
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_catalog::{CatalogService, MongoDocumentStore, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let store = MongoDocumentStore::new(client.database("medicine_distribution"));
//!
//! let router = handlers::router(CatalogService::new(store));
//! # Ok(())
//! # }
//! ```

pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod mongo;
pub mod repository;
pub mod schema;
pub mod service;
pub mod validation;

// Re-export commonly used types
pub use diagnostics::ConnectivityReport;
pub use error::{CatalogError, CatalogResult};
pub use handlers::ApiDoc;
pub use models::{CreatedId, Customer, Entity, Inquiry, Order, OrderItem, Product};
pub use mongo::MongoDocumentStore;
pub use repository::DocumentStore;
pub use schema::{ENTITIES, EntitySchema, SchemaCatalog};
pub use service::CatalogService;
pub use validation::{ValidationFailure, Violation, ViolationCode};
