use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::errors::responses::{
    BadRequestJsonResponse, InternalServerErrorResponse, ServiceUnavailableResponse,
    UnprocessableEntityResponse,
};
use serde_json::Value;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::CatalogResult;
use crate::extract::CheckedJson;
use crate::models::{CreatedId, Customer, Entity, Inquiry, Order, OrderItem, Product};
use crate::repository::DocumentStore;
use crate::schema::SchemaCatalog;
use crate::service::CatalogService;

/// OpenAPI documentation for the catalog API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_schema,
        list_products,
        create_product,
        create_customer,
        create_order,
        create_inquiry,
    ),
    components(
        schemas(Product, Customer, Order, OrderItem, Inquiry, CreatedId),
        responses(
            BadRequestJsonResponse,
            UnprocessableEntityResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Catalog", description = "Products, customers, orders and inquiries"),
        (name = "Schema", description = "Entity schema introspection")
    )
)]
pub struct ApiDoc;

/// Create the catalog router with all HTTP endpoints
pub fn router<D: DocumentStore + 'static>(service: CatalogService<D>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/schema", get(get_schema))
        .route(
            "/products",
            get(list_products::<D>).post(create_product::<D>),
        )
        .route("/customers", post(create_customer::<D>))
        .route("/orders", post(create_order::<D>))
        .route("/inquiries", post(create_inquiry::<D>))
        .with_state(shared_service)
}

async fn create_entity<D: DocumentStore, T: Entity>(
    service: &CatalogService<D>,
    record: T,
) -> CatalogResult<impl IntoResponse + use<D, T>> {
    let id = service.create(&record).await?;
    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

/// Field-to-type descriptors for every persisted entity
#[utoipa::path(
    get,
    path = "/schema",
    tag = "Schema",
    responses(
        (status = 200, description = "Map of entity name to {field: type descriptor}")
    )
)]
async fn get_schema() -> Json<SchemaCatalog> {
    Json(SchemaCatalog::registry())
}

/// List all products
#[utoipa::path(
    get,
    path = "/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "Every stored product, `_id` as string", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn list_products<D: DocumentStore>(
    State(service): State<Arc<CatalogService<D>>>,
) -> CatalogResult<Json<Vec<Value>>> {
    let documents = service.get_documents(Product::collection()).await?;
    Ok(Json(documents))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Catalog",
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = CreatedId),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_product<D: DocumentStore>(
    State(service): State<Arc<CatalogService<D>>>,
    CheckedJson(product): CheckedJson<Product>,
) -> CatalogResult<impl IntoResponse> {
    create_entity(&service, product).await
}

/// Create a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "Catalog",
    request_body = Customer,
    responses(
        (status = 201, description = "Customer created", body = CreatedId),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_customer<D: DocumentStore>(
    State(service): State<Arc<CatalogService<D>>>,
    CheckedJson(customer): CheckedJson<Customer>,
) -> CatalogResult<impl IntoResponse> {
    create_entity(&service, customer).await
}

/// Create an order
///
/// Totals are stored as submitted; they are not recomputed from the items.
#[utoipa::path(
    post,
    path = "/orders",
    tag = "Catalog",
    request_body = Order,
    responses(
        (status = 201, description = "Order created", body = CreatedId),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_order<D: DocumentStore>(
    State(service): State<Arc<CatalogService<D>>>,
    CheckedJson(order): CheckedJson<Order>,
) -> CatalogResult<impl IntoResponse> {
    create_entity(&service, order).await
}

/// Create a contact or RFQ inquiry
#[utoipa::path(
    post,
    path = "/inquiries",
    tag = "Catalog",
    request_body = Inquiry,
    responses(
        (status = 201, description = "Inquiry created", body = CreatedId),
        (status = 400, response = BadRequestJsonResponse),
        (status = 422, response = UnprocessableEntityResponse),
        (status = 500, response = InternalServerErrorResponse),
        (status = 503, response = ServiceUnavailableResponse)
    )
)]
async fn create_inquiry<D: DocumentStore>(
    State(service): State<Arc<CatalogService<D>>>,
    CheckedJson(inquiry): CheckedJson<Inquiry>,
) -> CatalogResult<impl IntoResponse> {
    create_entity(&service, inquiry).await
}
