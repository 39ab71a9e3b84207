//! Handler tests for the Catalog domain
//!
//! These tests drive the catalog router end to end over an in-memory
//! DocumentStore:
//! - Request validation (422 with every violation)
//! - Create/list round trips through the store
//! - Status codes for store failures
//! - Schema introspection

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_catalog::*;
use http_body_util::BodyExt;
use mongodb::bson::{Bson, Document, oid::ObjectId};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Mutex;
use test_utils::TestDataBuilder;
use tower::ServiceExt; // For oneshot()

/// DocumentStore keeping collections in memory, generating ObjectIds like MongoDB
#[derive(Default)]
struct InMemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    fn database_name(&self) -> String {
        "memory".to_string()
    }

    async fn insert(&self, collection: &str, mut document: Document) -> CatalogResult<String> {
        let oid = ObjectId::new();
        document.insert("_id", Bson::ObjectId(oid));
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(oid.to_hex())
    }

    async fn find_all(&self, collection: &str) -> CatalogResult<Vec<Document>> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn collection_names(&self) -> CatalogResult<Vec<String>> {
        Ok(self.collections.lock().unwrap().keys().cloned().collect())
    }
}

/// DocumentStore whose every call fails as if the server were unreachable
struct UnreachableStore;

#[async_trait]
impl DocumentStore for UnreachableStore {
    fn database_name(&self) -> String {
        "unreachable".to_string()
    }

    async fn insert(&self, _collection: &str, _document: Document) -> CatalogResult<String> {
        Err(CatalogError::StorageUnavailable(
            "server selection timeout".to_string(),
        ))
    }

    async fn find_all(&self, _collection: &str) -> CatalogResult<Vec<Document>> {
        Err(CatalogError::StorageUnavailable(
            "server selection timeout".to_string(),
        ))
    }

    async fn collection_names(&self) -> CatalogResult<Vec<String>> {
        Err(CatalogError::StorageUnavailable(
            "server selection timeout".to_string(),
        ))
    }
}

fn app() -> Router {
    handlers::router(CatalogService::new(InMemoryStore::default()))
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(payload).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn violation_fields(body: &Value) -> Vec<String> {
    body["details"]["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap().to_string())
        .collect()
}

fn paracetamol() -> Value {
    json!({
        "name": "Paracetamol",
        "sku": "PARA500",
        "dosage_form": "tablet",
        "strength": "500 mg",
        "manufacturer": "Acme",
        "price": 2.5,
        "stock": 100
    })
}

#[tokio::test]
async fn test_create_product_returns_201_with_id() {
    let app = app();

    let response = app
        .clone()
        .oneshot(post_json("/products", &paracetamol()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let created: CreatedId = serde_json::from_value(json_body(response.into_body()).await).unwrap();
    assert_eq!(created.id.len(), 24);
    assert!(created.id.chars().all(|c| c.is_ascii_hexdigit()));

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let products = json_body(response.into_body()).await;
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["_id"], Value::String(created.id));
    assert_eq!(products[0]["name"], "Paracetamol");
    assert_eq!(products[0]["rx_required"], true);
    assert_eq!(products[0]["cold_chain"], false);
    assert_eq!(products[0]["therapeutic_class"], Value::Null);
}

#[tokio::test]
async fn test_list_returns_every_created_product() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("test_list_returns_every_created_product");

    let mut ids = Vec::new();
    for i in 0..5 {
        let mut product = paracetamol();
        product["sku"] = json!(builder.sku(&i.to_string()));
        product["price"] = json!(i);
        product["stock"] = json!(0);

        let response = app.clone().oneshot(post_json("/products", &product)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response.into_body()).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let response = app.oneshot(get("/products")).await.unwrap();
    let products = json_body(response.into_body()).await;
    let listed: Vec<String> = products
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["_id"].as_str().expect("_id must be a string").to_string())
        .collect();

    assert_eq!(listed, ids);
}

#[tokio::test]
async fn test_list_products_empty() {
    let response = app().oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_negative_price_is_rejected_with_422() {
    let mut product = paracetamol();
    product["price"] = json!(-1);

    let response = app().oneshot(post_json("/products", &product)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "UNPROCESSABLE_ENTITY");
    assert_eq!(violation_fields(&body), vec!["price"]);
    assert_eq!(body["details"]["violations"][0]["code"], "range");
}

#[tokio::test]
async fn test_every_violation_is_reported() {
    let product = json!({ "name": "Paracetamol", "price": -3, "stock": -1 });

    let response = app().oneshot(post_json("/products", &product)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let fields = violation_fields(&json_body(response.into_body()).await);
    assert_eq!(
        fields,
        vec!["sku", "dosage_form", "strength", "manufacturer", "price", "stock"]
    );
}

#[tokio::test]
async fn test_invalid_product_is_not_persisted() {
    let app = app();
    let mut product = paracetamol();
    product["stock"] = json!(-5);

    let response = app.clone().oneshot(post_json("/products", &product)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(json_body(response.into_body()).await, json!([]));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/inquiries")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_inquiry() {
    let inquiry = json!({
        "name": "Dana Whitfield",
        "email": "dana@northside-pharmacy.example",
        "message": "Requesting a quote for 500 boxes of amoxicillin",
        "company": "Northside Pharmacy"
    });

    let response = app().oneshot(post_json("/inquiries", &inquiry)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert!(!body["id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_email_is_rejected_for_every_entity() {
    let app = app();

    let cases = [
        (
            "/inquiries",
            json!({ "name": "Dana", "email": "dana-at-example", "message": "RFQ" }),
            "email",
        ),
        (
            "/customers",
            json!({ "name": "Northside Pharmacy", "email": "@example.com" }),
            "email",
        ),
        (
            "/orders",
            json!({
                "customer_name": "Clinic",
                "customer_email": "clinic.example",
                "items": [{ "sku": "PARA500", "quantity": 1, "price": 2.5 }],
                "subtotal": 2.5,
                "total": 2.5
            }),
            "customer_email",
        ),
    ];

    for (uri, payload, field) in cases {
        let response = app.clone().oneshot(post_json(uri, &payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        let fields = violation_fields(&json_body(response.into_body()).await);
        assert_eq!(fields, vec![field.to_string()], "{uri}");
    }
}

#[tokio::test]
async fn test_single_label_email_domain_is_rejected() {
    let inquiry = json!({ "name": "Dana", "email": "dana@pharmacy", "message": "RFQ" });

    let response = app().oneshot(post_json("/inquiries", &inquiry)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response.into_body()).await;
    assert_eq!(violation_fields(&body), vec!["email".to_string()]);
    assert_eq!(body["details"]["violations"][0]["code"], "email");
}

#[tokio::test]
async fn test_integral_float_stock_is_stored_as_integer() {
    let app = app();
    let mut product = paracetamol();
    product["stock"] = json!(100.0);

    let response = app.clone().oneshot(post_json("/products", &product)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/products")).await.unwrap();
    let products = json_body(response.into_body()).await;
    assert_eq!(products[0]["stock"], json!(100));
}

#[tokio::test]
async fn test_order_item_quantity_must_be_positive() {
    let app = app();

    for quantity in [0, -1] {
        let order = json!({
            "customer_name": "Clinic",
            "customer_email": "orders@clinic.example",
            "items": [
                { "sku": "PARA500", "quantity": 2, "price": 2.5 },
                { "sku": "AMOX250", "quantity": quantity, "price": 4.0 }
            ],
            "subtotal": 9.0,
            "tax": 0.9,
            "total": 9.9
        });

        let response = app.clone().oneshot(post_json("/orders", &order)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let fields = violation_fields(&json_body(response.into_body()).await);
        assert_eq!(fields, vec!["items[1].quantity"]);
    }
}

#[tokio::test]
async fn test_create_order_and_customer() {
    let app = app();
    let builder = TestDataBuilder::from_test_name("test_create_order_and_customer");

    let order = json!({
        "customer_name": "Clinic",
        "customer_email": builder.email("orders"),
        "items": [{ "sku": "PARA500", "quantity": 2, "price": 2.5 }],
        "subtotal": 5.0,
        "total": 999.0,
        "notes": "Deliver before noon"
    });
    let response = app.clone().oneshot(post_json("/orders", &order)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let customer = json!({
        "name": "Northside Pharmacy",
        "email": builder.email("buyer"),
        "organization_type": "pharmacy"
    });
    let response = app.clone().oneshot(post_json("/customers", &customer)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let app = handlers::router(CatalogService::new(UnreachableStore));

    let response = app
        .clone()
        .oneshot(post_json("/products", &paracetamol()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let response = app.oneshot(get("/products")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_uninitialized_store_is_server_error() {
    let service: CatalogService<InMemoryStore> =
        CatalogService::uninitialized("database URL not set");
    let app = handlers::router(service);

    let response = app
        .clone()
        .oneshot(post_json("/products", &paracetamol()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // Validation still runs before the store is needed
    let response = app
        .oneshot(post_json("/products", &json!({ "price": -1 })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_schema_lists_four_entities() {
    let response = app().oneshot(get("/schema")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let entities = body.as_object().unwrap();
    assert_eq!(entities.len(), 4);

    for schema in ENTITIES.iter() {
        let fields = entities[schema.name].as_object().unwrap();
        let mut listed: Vec<&str> = fields.keys().map(|k| k.as_str()).collect();
        let mut declared: Vec<&str> = schema.field_names().collect();
        listed.sort();
        declared.sort();
        assert_eq!(listed, declared, "{}", schema.name);
    }

    assert_eq!(body["product"]["stock"], "integer (>= 0)");
    assert_eq!(body["inquiry"]["company"], "optional[string]");
}
