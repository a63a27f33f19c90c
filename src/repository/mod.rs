//! Persistence boundary for the `products` table.

mod memory;
mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;

use crate::error::RepositoryError;
use crate::model::{CreateProductPayload, Product, UpdateProductPayload};
use async_trait::async_trait;

/// Each call is one autonomous statement; nothing spans calls.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product and return the id assigned by storage.
    async fn create_product(&self, payload: &CreateProductPayload) -> Result<i64, RepositoryError>;

    /// Fails with `RepositoryError::NotFound` when no row has `id`.
    async fn get_product_by_id(&self, id: i64) -> Result<Product, RepositoryError>;

    /// Up to `limit` products after skipping `offset`, ordered by id. Empty when nothing matches.
    async fn get_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, RepositoryError>;

    /// Overwrite name and price. Fails with `RepositoryError::NotFound` when no row was affected.
    async fn update_product(&self, id: i64, payload: &UpdateProductPayload) -> Result<(), RepositoryError>;

    /// Remove the product. Deleting an absent id succeeds.
    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError>;
}
