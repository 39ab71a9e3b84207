//! Server infrastructure module.
//!
//! This module provides:
//! - Router setup with OpenAPI documentation
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router};
//! use axum_helpers::http::create_permissive_cors_layer;
//!
//! let router = create_router::<ApiDoc>(api_routes, create_permissive_cors_layer());
//! create_production_app(router, &config.server, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod shutdown;

pub use app::{create_production_app, create_router};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
