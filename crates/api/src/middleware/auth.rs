//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use inka_core::error::CoreError;
use inka_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

/// Message returned for every bearer-token failure.
const CREDENTIALS_REJECTED: &str = "Could not validate credentials";

/// Authenticated user resolved from a Bearer token in the `Authorization` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(CREDENTIALS_REJECTED.into()))
            })?;

        let token = bearer_token(auth_header).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(CREDENTIALS_REJECTED.into()))
        })?;

        let identity = state
            .auth
            .resolve_current_identity(token)
            .await
            .map_err(|e| AppError::from_auth(e, CREDENTIALS_REJECTED))?;

        Ok(AuthUser {
            user_id: identity.id,
            username: identity.identifier,
        })
    }
}

/// Extract the token from a `Bearer <token>` header value.
///
/// The scheme is matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
