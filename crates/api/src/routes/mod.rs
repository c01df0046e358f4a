pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{auth, products, users};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /token                       exchange credentials for a token (public, form)
///
/// /users                       list (auth), create (public)
/// /users/me                    current user (auth)
/// /users/{id}                  get, update, delete (auth)
/// /users/{id}/products         list, create (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/token", post(auth::issue_token))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/me", get(users::get_me))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/{id}/products",
            get(products::list_products).post(products::create_product),
        )
}
