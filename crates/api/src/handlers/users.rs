//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use inka_core::auth::password::{hash_password, validate_password_strength};
use inka_core::error::CoreError;
use inka_core::models::user::{CreateUser, UpdateUser, User, UserResponse};
use inka_core::types::UserId;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /users/{id}`. All fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/users
///
/// Register a new user. Validates the input, hashes the password, and returns
/// a safe [`UserResponse`] with 201 Created.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password, state.config.min_password_length)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Argon2 is CPU-heavy; keep it off the async workers.
    let password = input.password;
    let hashed = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    let user = state
        .users
        .create(CreateUser {
            first_name: input.first_name,
            last_name: input.last_name,
            city: input.city,
            username: input.username,
            password_hash: hashed,
        })
        .await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User created");

    Ok((StatusCode::CREATED, Json(UserResponse::new(user, Vec::new()))))
}

/// GET /api/v1/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;

    let mut responses = Vec::with_capacity(users.len());
    for user in users {
        responses.push(to_response(&state, user).await?);
    }
    Ok(Json(responses))
}

/// GET /api/v1/users/me
///
/// The user the presented token was issued to.
pub async fn get_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, auth.user_id).await?;
    Ok(Json(to_response(&state, user).await?))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<UserId>,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, id).await?;
    Ok(Json(to_response(&state, user).await?))
}

/// PUT /api/v1/users/{id}
///
/// Update names and city. Username and password are not changeable here.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let update = UpdateUser {
        first_name: input.first_name,
        last_name: input.last_name,
        city: input.city,
    };
    let user = state
        .users
        .update(id, update)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tracing::info!(user_id = %id, by = %auth.username, "User updated");

    Ok(Json(to_response(&state, user).await?))
}

/// DELETE /api/v1/users/{id}
///
/// Remove a user and their products. Returns 204 No Content.
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<UserId>,
) -> AppResult<StatusCode> {
    if !state.users.delete(id).await? {
        return Err(user_not_found(id));
    }
    tracing::info!(user_id = %id, by = %auth.username, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: UserId) -> AppResult<User> {
    state
        .users
        .get(id)
        .await?
        .ok_or_else(|| user_not_found(id))
}

async fn to_response(state: &AppState, user: User) -> AppResult<UserResponse> {
    let products = state.products.list_by_owner(user.id).await?;
    Ok(UserResponse::new(user, products))
}

fn user_not_found(id: UserId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}
