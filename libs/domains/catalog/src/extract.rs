//! JSON extractor that checks the body against the entity's registry schema.

use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use axum_helpers::AppError;
use serde_json::Value;

use crate::error::CatalogError;
use crate::models::Entity;
use crate::validation::{ValidationFailure, Violation, ViolationCode};

/// JSON body checked against `T`'s schema before deserialization.
///
/// Malformed JSON is rejected by the inner `Json` extractor (400/415).
/// A well-formed body that breaks the schema is rejected with 422 and every
/// violation listed in `details.violations`.
pub struct CheckedJson<T>(pub T);

impl<T, S> FromRequest<S> for CheckedJson<T>
where
    T: Entity,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut payload) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        let schema = T::schema();
        schema
            .check(&payload)
            .map_err(|failure| CatalogError::Validation(failure).into_response())?;
        schema.normalize(&mut payload);

        let record = serde_json::from_value::<T>(payload).map_err(|e| {
            let failure = ValidationFailure::new(
                schema.name,
                vec![Violation::new("body", ViolationCode::InvalidType, e.to_string())],
            );
            CatalogError::Validation(failure).into_response()
        })?;

        Ok(CheckedJson(record))
    }
}
