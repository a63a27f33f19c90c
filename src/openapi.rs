//! OpenAPI document for the product endpoints.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::product;
use crate::model::{CreateProductPayload, CreateProductResponse, Product, UpdateProductPayload};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Products API", description = "CRUD over the products table"),
    paths(
        product::create_product,
        product::get_product,
        product::list_products,
        product::update_product,
        product::delete_product,
    ),
    components(schemas(
        Product,
        CreateProductPayload,
        CreateProductResponse,
        UpdateProductPayload,
        ErrorBody,
        ErrorDetail,
    )),
    tags((name = "products", description = "Product management"))
)]
pub struct ApiDoc;
