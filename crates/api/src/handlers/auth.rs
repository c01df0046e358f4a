//! Handler for the token endpoint.

use axum::extract::State;
use axum::{Form, Json};
use inka_core::auth::AccessToken;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Message returned for every login failure, whichever check failed.
const LOGIN_REJECTED: &str = "Invalid username or password";

/// Form body for `POST /token` (OAuth2 password grant).
///
/// Extra OAuth2 fields such as `scope` or `client_id` are accepted and ignored.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
}

/// POST /api/v1/token
///
/// Exchange a username and password for a bearer access token.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(input): Form<TokenRequest>,
) -> AppResult<Json<AccessToken>> {
    if let Some(grant_type) = input.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(AppError::BadRequest(format!(
                "Unsupported grant_type '{grant_type}'"
            )));
        }
    }

    let (_identity, token) = state
        .auth
        .login(&input.username, &input.password)
        .await
        .map_err(|e| AppError::from_auth(e, LOGIN_REJECTED))?;

    Ok(Json(token))
}
