//! Product endpoints. All routes sit behind the auth gate and receive the
//! caller as a typed [`AuthenticatedUser`] extension.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
};
use std::sync::Arc;
use uuid::Uuid;

use super::models::{CreateProductRequest, Product, UpdateProductRequest};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiResponse, ApiResult, created, ok};
use crate::user_auth::AuthenticatedUser;
use crate::validation::{ValidationError, validate};

fn parse_product_id(raw: &str) -> Result<Uuid, ValidationError> {
    Uuid::parse_str(raw).map_err(|_| ValidationError::field("id", "must be a valid product id"))
}

/// List the caller's products
///
/// GET /api/v1/products
#[utoipa::path(
    get,
    path = "/api/v1/products",
    responses(
        (status = 200, description = "Products owned by the caller", body = ApiResponse<Vec<Product>>),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<Vec<Product>> {
    let products = state.catalog.list(&user).await?;
    ok(products)
}

/// Create a product owned by the caller
///
/// POST /api/v1/products
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ApiResponse<Product>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let Json(req) = body?;
    let req = req.normalized();
    validate(&req)?;

    let product = state.catalog.create(&user, req.into_new_product()).await?;
    created(product)
}

/// Partially update one of the caller's products
///
/// PUT /api/v1/products/{id}
#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid id or input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> ApiResult<Product> {
    let id = parse_product_id(&id)?;
    let Json(req) = body?;
    let req = req.normalized();
    validate(&req)?;

    let product = state.catalog.update(&user, id, req.into_patch()).await?;
    ok(product)
}

/// Delete one of the caller's products
///
/// DELETE /api/v1/products/{id}
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(
        ("id" = String, Path, description = "Product id (UUID)")
    ),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Invalid id"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Product not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let id = parse_product_id(&id)?;

    state.catalog.delete(&user, id).await?;
    ok(())
}
