//! Product CRUD handlers: create, read, list, update, delete.

use crate::error::{AppError, ErrorBody, RepositoryError};
use crate::extractors::ValidatedJson;
use crate::model::{CreateProductPayload, CreateProductResponse, Product, UpdateProductPayload};
use crate::response::{created, no_content, ok};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use std::collections::HashMap;

pub const DEFAULT_LIMIT: i64 = 10;
pub const DEFAULT_OFFSET: i64 = 0;

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid ID: {}", id_str)))
}

/// Read `limit` (default 10, must be > 0) and `offset` (default 0, must be >= 0).
pub fn parse_pagination(params: &HashMap<String, String>) -> Result<(i64, i64), AppError> {
    let limit = match params.get("limit") {
        Some(v) => v.parse().map_err(|_| AppError::BadRequest("Invalid limit".into()))?,
        None => DEFAULT_LIMIT,
    };
    if limit <= 0 {
        return Err(AppError::BadRequest("Limit must be greater than 0".into()));
    }
    let offset = match params.get("offset") {
        Some(v) => v.parse().map_err(|_| AppError::BadRequest("Invalid offset".into()))?,
        None => DEFAULT_OFFSET,
    };
    if offset < 0 {
        return Err(AppError::BadRequest("Offset must be greater than or equal to 0".into()));
    }
    Ok((limit, offset))
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Product created", body = CreateProductResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .products
        .create_product(&payload)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to create product"))?;
    tracing::info!(id, "product created");
    Ok(created(CreateProductResponse { id }))
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let product = state
        .products
        .get_product_by_id(id)
        .await
        .map_err(|e| AppError::from_repository(e, format!("Failed to retrieve product with id: {}", id)))?;
    Ok(ok(product))
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(
        ("limit" = Option<i64>, Query, description = "Maximum number of products (default 10)"),
        ("offset" = Option<i64>, Query, description = "Number of products to skip (default 0)"),
    ),
    responses(
        (status = 200, description = "Page of products", body = [Product]),
        (status = 400, description = "Invalid limit or offset", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let (limit, offset) = parse_pagination(&params)?;
    let products = state
        .products
        .get_products(limit, offset)
        .await
        .map_err(|e| AppError::from_repository(e, "Failed to retrieve products"))?;
    Ok(ok(products))
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    request_body = UpdateProductPayload,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid ID or input", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state
        .products
        .update_product(id, &payload)
        .await
        .map_err(|e| AppError::from_repository(e, format!("Failed to update product with ID: {}", id)))?;
    Ok(ok(Product::from_update(id, payload)))
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "products",
    params(("id" = i64, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted, or did not exist"),
        (status = 400, description = "Invalid ID", body = ErrorBody),
        (status = 500, description = "Persistence failure", body = ErrorBody),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    match state.products.delete_product(id).await {
        Ok(()) | Err(RepositoryError::NotFound { .. }) => Ok(no_content()),
        Err(e) => Err(AppError::from_repository(e, format!("Failed to delete product with id: {}", id))),
    }
}
