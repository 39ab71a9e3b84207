//! API routes module
//!
//! This module defines all HTTP API routes for the medicine distribution API.

pub mod diagnostics;
pub mod root;

use axum::{Router, routing::get};
use domain_catalog::handlers;

use crate::state::AppState;

/// Create all API routes
/// Note: these are mounted at the root by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root::root))
        .route("/test", get(diagnostics::connectivity_test))
        .with_state(state.clone())
        .merge(handlers::router(state.catalog.clone()))
}
