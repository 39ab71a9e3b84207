use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

use crate::validation::ValidationFailure;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    Validation(ValidationFailure),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Document store not initialized: {0}")]
    NotInitialized(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Underlying message without the variant prefix
    pub fn detail(&self) -> String {
        match self {
            CatalogError::Validation(failure) => failure.to_string(),
            CatalogError::StorageUnavailable(msg)
            | CatalogError::NotInitialized(msg)
            | CatalogError::Serialization(msg) => msg.clone(),
        }
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(failure) => AppError::UnprocessableEntity {
                message: failure.to_string(),
                details: serde_json::to_value(&failure).ok(),
            },
            CatalogError::StorageUnavailable(msg) => AppError::ServiceUnavailable(msg),
            CatalogError::NotInitialized(msg) => {
                AppError::InternalServerError(format!("Document store not initialized: {}", msg))
            }
            CatalogError::Serialization(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<ValidationFailure> for CatalogError {
    fn from(failure: ValidationFailure) -> Self {
        CatalogError::Validation(failure)
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::StorageUnavailable(err.to_string())
    }
}
