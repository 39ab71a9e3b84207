use async_trait::async_trait;
use mongodb::bson::{Bson, Document};

use crate::error::CatalogResult;

/// Document persistence interface
///
/// Collections are addressed by name; records travel as BSON documents.
/// Implementations generate the `_id` of inserted documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Name of the underlying database
    fn database_name(&self) -> String;

    /// Insert a document and return its generated identifier as a string
    async fn insert(&self, collection: &str, document: Document) -> CatalogResult<String>;

    /// Every document in a collection, unfiltered
    async fn find_all(&self, collection: &str) -> CatalogResult<Vec<Document>>;

    /// Names of all collections in the database
    async fn collection_names(&self) -> CatalogResult<Vec<String>>;
}

/// Canonical string form of a document identifier
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
