//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Service-level endpoints served next to the catalog routes
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Medicine Distribution API",
        version = "0.1.0",
        description = "Catalog, ordering and inquiry API for a medicine distributor"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(crate::api::root::root, crate::api::diagnostics::connectivity_test),
    components(schemas(domain_catalog::ConnectivityReport)),
    tags(
        (name = "Service", description = "Liveness and connectivity diagnostics")
    )
)]
struct ServiceDoc;

/// Combined OpenAPI documentation for all APIs
///
/// Catalog routes are mounted at the root, so their document is merged
/// rather than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        ServiceDoc::openapi().merge_from(domain_catalog::ApiDoc::openapi())
    }
}
