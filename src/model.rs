//! Product entity and the request/response DTOs around it.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored product. `id` is assigned by the database and never changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, ToSchema)]
pub struct CreateProductPayload {
    pub name: String,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateProductResponse {
    pub id: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, ToSchema)]
pub struct UpdateProductPayload {
    pub name: String,
    pub price: f64,
}

impl Product {
    pub fn from_update(id: i64, payload: UpdateProductPayload) -> Self {
        Product {
            id,
            name: payload.name,
            price: payload.price,
        }
    }
}

/// Input checks run at the HTTP boundary, before anything reaches storage.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

fn validate_fields(name: &str, price: f64) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::Validation("price must be greater than 0".into()));
    }
    Ok(())
}

impl Validate for CreateProductPayload {
    fn validate(&self) -> Result<(), AppError> {
        validate_fields(&self.name, self.price)
    }
}

impl Validate for UpdateProductPayload {
    fn validate(&self) -> Result<(), AppError> {
        validate_fields(&self.name, self.price)
    }
}
