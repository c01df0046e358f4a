//! Handlers for products nested under a user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inka_core::error::CoreError;
use inka_core::models::product::{CreateProduct, Product};
use inka_core::types::UserId;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /users/{id}/products`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 200))]
    pub name_product: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

/// POST /api/v1/users/{id}/products
pub async fn create_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(owner_id): Path<UserId>,
    Json(input): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<Product>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let product = state
        .products
        .create_for_owner(
            owner_id,
            CreateProduct {
                name_product: input.name_product,
                price: input.price,
            },
        )
        .await?;
    tracing::info!(product_id = product.id, %owner_id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/users/{id}/products
pub async fn list_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(owner_id): Path<UserId>,
) -> AppResult<Json<Vec<Product>>> {
    if state.users.get(owner_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: owner_id.to_string(),
        }));
    }
    Ok(Json(state.products.list_by_owner(owner_id).await?))
}
