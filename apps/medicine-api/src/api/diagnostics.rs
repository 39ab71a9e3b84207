//! Connectivity diagnostics
//!
//! Always answers 200; storage problems are reported in the body.

use axum::{Json, extract::State};
use domain_catalog::ConnectivityReport;

use crate::state::AppState;

/// Report database configuration and reachability
#[utoipa::path(
    get,
    path = "/test",
    tag = "Service",
    responses(
        (status = 200, description = "Connectivity report", body = ConnectivityReport)
    )
)]
pub async fn connectivity_test(State(state): State<AppState>) -> Json<ConnectivityReport> {
    let report = state
        .catalog
        .connectivity_report(state.config.mongodb.is_some())
        .await;
    Json(report)
}
