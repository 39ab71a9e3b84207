//! Catalog Service - validation and document mapping on top of a DocumentStore

use mongodb::bson::{self, Bson, Document};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::Entity;
use crate::repository::{DocumentStore, id_to_string};
use crate::validation::ValidationFailure;

/// Catalog service providing create/list operations over named collections
///
/// The service may be built without a store (missing or unusable database
/// configuration); every data operation then fails with
/// [`CatalogError::NotInitialized`].
pub struct CatalogService<D: DocumentStore> {
    store: Result<Arc<D>, Arc<str>>,
}

impl<D: DocumentStore> CatalogService<D> {
    /// Create a new CatalogService with the given store
    pub fn new(store: D) -> Self {
        Self {
            store: Ok(Arc::new(store)),
        }
    }

    /// Create a CatalogService whose store could not be constructed
    pub fn uninitialized(reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        Self {
            store: Err(Arc::from(reason)),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_ok()
    }

    pub fn database_name(&self) -> Option<String> {
        self.store.as_ref().ok().map(|store| store.database_name())
    }

    fn store(&self) -> CatalogResult<&D> {
        match &self.store {
            Ok(store) => Ok(store.as_ref()),
            Err(reason) => Err(CatalogError::NotInitialized(reason.to_string())),
        }
    }

    /// Validate a typed record and persist it to its entity collection
    #[instrument(skip(self, record), fields(collection = T::collection()))]
    pub async fn create<T: Entity>(&self, record: &T) -> CatalogResult<String> {
        record
            .validate()
            .map_err(|e| ValidationFailure::from_validator(T::schema().name, &e))?;

        self.create_document(T::collection(), record).await
    }

    /// Serialize a record to BSON, insert it and return the generated id
    #[instrument(skip(self, record))]
    pub async fn create_document<T: Serialize + ?Sized>(
        &self,
        collection: &str,
        record: &T,
    ) -> CatalogResult<String> {
        let store = self.store()?;
        let document =
            bson::to_document(record).map_err(|e| CatalogError::Serialization(e.to_string()))?;

        store.insert(collection, document).await
    }

    /// Every document in a collection, with `_id` rendered as a string
    #[instrument(skip(self))]
    pub async fn get_documents(&self, collection: &str) -> CatalogResult<Vec<Value>> {
        let documents = self.store()?.find_all(collection).await?;
        Ok(documents.into_iter().map(document_to_json).collect())
    }

    /// Collection names, used as a connectivity probe
    #[instrument(skip(self))]
    pub async fn collection_names(&self) -> CatalogResult<Vec<String>> {
        self.store()?.collection_names().await
    }
}

impl<D: DocumentStore> Clone for CatalogService<D> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

fn document_to_json(mut document: Document) -> Value {
    if let Some(id) = document.get("_id") {
        let id = id_to_string(id);
        document.insert("_id", id);
    }
    Bson::Document(document).into_relaxed_extjson()
}
