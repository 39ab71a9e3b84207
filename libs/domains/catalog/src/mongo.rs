//! MongoDB implementation of DocumentStore

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{Document, doc},
};
use tracing::instrument;

use crate::error::CatalogResult;
use crate::repository::{DocumentStore, id_to_string};

/// MongoDB implementation of the DocumentStore
#[derive(Clone)]
pub struct MongoDocumentStore {
    db: Database,
}

impl MongoDocumentStore {
    /// Create a new MongoDocumentStore
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let store = MongoDocumentStore::new(client.database("medicine_distribution"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection::<Document>(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    fn database_name(&self) -> String {
        self.db.name().to_string()
    }

    #[instrument(skip(self, document))]
    async fn insert(&self, collection: &str, document: Document) -> CatalogResult<String> {
        let result = self.collection(collection).insert_one(document).await?;
        let id = id_to_string(&result.inserted_id);

        tracing::info!(document_id = %id, "Document inserted");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, collection: &str) -> CatalogResult<Vec<Document>> {
        let cursor = self.collection(collection).find(doc! {}).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    #[instrument(skip(self))]
    async fn collection_names(&self) -> CatalogResult<Vec<String>> {
        Ok(self.db.list_collection_names().await?)
    }
}
