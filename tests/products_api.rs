use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use products_api::{
    app, AppState, CreateProductPayload, InMemoryProductRepository, Product, ProductRepository, RepositoryError,
    UpdateProductPayload,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Fails every call with a driver error and counts how often storage was reached.
#[derive(Default)]
struct FailingRepository {
    calls: AtomicUsize,
}

impl FailingRepository {
    fn fail(&self) -> RepositoryError {
        self.calls.fetch_add(1, Ordering::SeqCst);
        RepositoryError::Persistence(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl ProductRepository for FailingRepository {
    async fn create_product(&self, _: &CreateProductPayload) -> Result<i64, RepositoryError> {
        Err(self.fail())
    }
    async fn get_product_by_id(&self, _: i64) -> Result<Product, RepositoryError> {
        Err(self.fail())
    }
    async fn get_products(&self, _: i64, _: i64) -> Result<Vec<Product>, RepositoryError> {
        Err(self.fail())
    }
    async fn update_product(&self, _: i64, _: &UpdateProductPayload) -> Result<(), RepositoryError> {
        Err(self.fail())
    }
    async fn delete_product(&self, _: i64) -> Result<(), RepositoryError> {
        Err(self.fail())
    }
}

fn memory_app() -> Router {
    app(AppState::new(InMemoryProductRepository::new()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            builder = builder.header("content-type", "application/json");
            Body::from(b.to_string())
        }
        None => Body::empty(),
    };
    send_request(app, builder.body(body).unwrap()).await
}

async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn seed(app: &Router, count: usize) -> Vec<i64> {
    let mut ids = Vec::new();
    for i in 1..=count {
        let body = format!(r#"{{"name":"Product {}","price":{}.0}}"#, i, i * 10);
        let (status, value) = send(app, "POST", "/products", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(value["id"].as_i64().unwrap());
    }
    ids
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&memory_app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "OK"}));
}

#[tokio::test]
async fn create_then_get_returns_submitted_product() {
    let app = memory_app();
    let (status, body) = send(&app, "POST", "/products", Some(r#"{"name":"Test Product","price":10.0}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();
    assert!(id >= 0);

    let (status, body) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id, "name": "Test Product", "price": 10.0}));
}

#[tokio::test]
async fn create_rejects_invalid_input() {
    let app = memory_app();
    for bad in [
        r#"{"name":"x","price":0}"#,
        r#"{"name":"x","price":-1.5}"#,
        r#"{"name":"","price":1.0}"#,
        r#"{"name":"x"}"#,
        r#"{"price":1.0}"#,
        r#"{"name":"x","price":"ten"}"#,
        r#"{"name":"x","price":1.0"#,
    ] {
        let (status, body) = send(&app, "POST", "/products", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", bad);
        assert!(body["error"]["message"].is_string());
    }
    let (_, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn create_accepts_body_without_content_type() {
    let app = memory_app();
    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .body(Body::from(r#"{"name":"Test Product","price":10.0}"#))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/products/{}", id))
        .header("content-type", "text/plain")
        .body(Body::from(r#"{"name":"Renamed","price":11.0}"#))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Renamed");
}

#[tokio::test]
async fn create_accepts_whitespace_name() {
    let app = memory_app();
    let (status, body) = send(&app, "POST", "/products", Some(r#"{"name":"   ","price":10.0}"#)).await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, stored) = send(&app, "GET", &format!("/products/{}", body["id"]), None).await;
    assert_eq!(stored["name"], "   ");
}

#[tokio::test]
async fn oversized_body_gets_json_error() {
    let app = memory_app();
    let name = "x".repeat(products_api::routes::BODY_LIMIT_BYTES + 1);
    let payload = format!(r#"{{"name":"{}","price":1.0}}"#, name);

    let (status, body) = send(&app, "POST", "/products", Some(&payload)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["error"]["code"], "payload_too_large");

    let request = Request::builder()
        .method("POST")
        .uri("/products")
        .header("content-type", "application/json")
        .header("content-length", payload.len().to_string())
        .body(Body::from(payload))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn create_reports_persistence_failure_without_driver_text() {
    let app = app(AppState::new(FailingRepository::default()));
    let (status, body) = send(&app, "POST", "/products", Some(r#"{"name":"x","price":1.0}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to create product");
}

#[tokio::test]
async fn get_rejects_non_integer_id() {
    let (status, body) = send(&memory_app(), "GET", "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Invalid ID: abc");
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let (status, body) = send(&memory_app(), "GET", "/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Product with id: 999 not found");
}

#[tokio::test]
async fn get_reports_persistence_failure() {
    let app = app(AppState::new(FailingRepository::default()));
    let (status, body) = send(&app, "GET", "/products/7", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to retrieve product with id: 7");
}

#[tokio::test]
async fn list_on_empty_store_is_empty_array() {
    let (status, body) = send(&memory_app(), "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_pages_in_insertion_order() {
    let app = memory_app();
    seed(&app, 4).await;

    let (status, first) = send(&app, "GET", "/products?limit=2&offset=0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        first,
        json!([
            {"id": 1, "name": "Product 1", "price": 10.0},
            {"id": 2, "name": "Product 2", "price": 20.0}
        ])
    );

    let (status, second) = send(&app, "GET", "/products?limit=2&offset=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        second,
        json!([
            {"id": 3, "name": "Product 3", "price": 30.0},
            {"id": 4, "name": "Product 4", "price": 40.0}
        ])
    );

    let (_, beyond) = send(&app, "GET", "/products?limit=2&offset=4", None).await;
    assert_eq!(beyond, json!([]));
}

#[tokio::test]
async fn list_defaults_to_ten() {
    let app = memory_app();
    seed(&app, 12).await;
    let (status, body) = send(&app, "GET", "/products", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn invalid_pagination_never_reaches_storage() {
    let repo = Arc::new(FailingRepository::default());
    let app = app(AppState {
        products: repo.clone(),
    });
    for uri in [
        "/products?limit=0",
        "/products?limit=-2&offset=0",
        "/products?limit=invalid&offset=0",
        "/products?limit=10&offset=-2",
        "/products?limit=10&offset=invalid",
    ] {
        let (status, _) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
    assert_eq!(repo.calls.load(Ordering::SeqCst), 0);

    let (status, body) = send(&app, "GET", "/products?limit=10&offset=0", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to retrieve products");
    assert_eq!(repo.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn update_changes_name_and_price_only() {
    let app = memory_app();
    let ids = seed(&app, 1).await;
    let uri = format!("/products/{}", ids[0]);

    let (status, body) = send(&app, "PUT", &uri, Some(r#"{"name":"Updated Product","price":15.0}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": ids[0], "name": "Updated Product", "price": 15.0}));

    let (_, stored) = send(&app, "GET", &uri, None).await;
    assert_eq!(stored, body);
}

#[tokio::test]
async fn update_missing_is_not_found_and_creates_nothing() {
    let app = memory_app();
    let (status, _) = send(&app, "PUT", "/products/3", Some(r#"{"name":"Updated Product","price":15.0}"#)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, list) = send(&app, "GET", "/products", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn update_rejects_bad_id_and_bad_input() {
    let app = memory_app();
    seed(&app, 1).await;
    let (status, _) = send(&app, "PUT", "/products/invalid", Some(r#"{"name":"x","price":1.0}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "PUT", "/products/1", Some(r#"{"name":"x","price":"invalid"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "PUT", "/products/1", Some(r#"{"name":"x","price":0}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_reports_persistence_failure() {
    let app = app(AppState::new(FailingRepository::default()));
    let (status, body) = send(&app, "PUT", "/products/5", Some(r#"{"name":"x","price":1.0}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to update product with ID: 5");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let app = memory_app();
    let ids = seed(&app, 1).await;
    let uri = format!("/products/{}", ids[0]);

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", "/products/424242", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn delete_rejects_bad_id_and_reports_failure() {
    let (status, _) = send(&memory_app(), "DELETE", "/products/x1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let app = app(AppState::new(FailingRepository::default()));
    let (status, body) = send(&app, "DELETE", "/products/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["message"], "Failed to delete product with id: 1");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = send(&memory_app(), "GET", "/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/products/{id}"]["put"].is_object());
}
