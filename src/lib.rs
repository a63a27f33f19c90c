//! Products API: REST backend for a single product resource over PostgreSQL.

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod state;

pub use config::Settings;
pub use error::{AppError, ConfigError, RepositoryError};
pub use model::{CreateProductPayload, CreateProductResponse, Product, UpdateProductPayload};
pub use repository::{InMemoryProductRepository, PgProductRepository, ProductRepository};
pub use routes::app;
pub use state::AppState;
