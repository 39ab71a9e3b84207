//! Service banner

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct RootMessage {
    message: String,
}

/// Liveness banner
#[utoipa::path(
    get,
    path = "/",
    tag = "Service",
    responses(
        (status = 200, description = "Service is running", body = RootMessage)
    )
)]
pub async fn root() -> Json<RootMessage> {
    Json(RootMessage {
        message: "Medicine Distribution API running".to_string(),
    })
}
