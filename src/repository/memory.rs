//! In-process product store with the same contract as the PostgreSQL backend.

use super::ProductRepository;
use crate::error::RepositoryError;
use crate::model::{CreateProductPayload, Product, UpdateProductPayload};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<Inner>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create_product(&self, payload: &CreateProductPayload) -> Result<i64, RepositoryError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(
            id,
            Product {
                id,
                name: payload.name.clone(),
                price: payload.price,
            },
        );
        Ok(id)
    }

    async fn get_product_by_id(&self, id: i64) -> Result<Product, RepositoryError> {
        self.inner
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn get_products(&self, limit: i64, offset: i64) -> Result<Vec<Product>, RepositoryError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let offset = usize::try_from(offset).unwrap_or(0);
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update_product(&self, id: i64, payload: &UpdateProductPayload) -> Result<(), RepositoryError> {
        let mut inner = self.inner.write().await;
        let row = inner.rows.get_mut(&id).ok_or(RepositoryError::NotFound { id })?;
        row.name = payload.name.clone();
        row.price = payload.price;
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> Result<(), RepositoryError> {
        self.inner.write().await.rows.remove(&id);
        Ok(())
    }
}
