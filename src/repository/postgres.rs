//! PostgreSQL-backed product repository.

use super::ProductRepository;
use crate::error::RepositoryError;
use crate::model::{CreateProductPayload, Product, UpdateProductPayload};
use async_trait::async_trait;
use sqlx::PgPool;

const INSERT_SQL: &str = "INSERT INTO products (name, price) VALUES ($1, $2) RETURNING id";
const SELECT_ONE_SQL: &str = "SELECT id, name, price FROM products WHERE id = $1";
const SELECT_PAGE_SQL: &str = "SELECT id, name, price FROM products ORDER BY id LIMIT $1 OFFSET $2";
const UPDATE_SQL: &str = "UPDATE products SET name = $1, price = $2 WHERE id = $3";
const DELETE_SQL: &str = "DELETE FROM products WHERE id = $1";

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create_product(&self, payload: &CreateProductPayload) -> Result<i64, RepositoryError> {
        tracing::debug!(sql = INSERT_SQL, name = %payload.name, price = payload.price, "query");
        let (id,): (i64,) = sqlx::query_as(INSERT_SQL)
            .bind(&payload.name)
            .bind(payload.price)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        tracing::debug!(sql = SELECT_ONE_SQL, id, "query");
        sqlx::query_as::<_, Product>(SELECT_ONE_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn get_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, RepositoryError> {
        tracing::debug!(sql = SELECT_PAGE_SQL, limit, offset, "query");
        let rows = sqlx::query_as::<_, Product>(SELECT_PAGE_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update_product(&self, id: i64, payload: &UpdateProductPayload) -> Result<(), RepositoryError> {
        tracing::debug!(sql = UPDATE_SQL, id, "query");
        let result = sqlx::query(UPDATE_SQL)
            .bind(&payload.name)
            .bind(payload.price)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound { id });
        }
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
        tracing::debug!(sql = DELETE_SQL, id, "query");
        sqlx::query(DELETE_SQL).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}
