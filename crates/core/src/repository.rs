//! Storage traits for users and products.
//!
//! Two backends implement them: [`crate::memory::MemoryStore`] and the
//! PostgreSQL store in `inka-db`. The backend is chosen once at startup and
//! handed around as `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::models::product::{CreateProduct, Product};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::types::{ProductId, UserId};

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ordered by username.
    async fn list(&self) -> CoreResult<Vec<User>>;

    async fn get(&self, id: UserId) -> CoreResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> CoreResult<Option<User>>;

    /// Insert a user. A taken username is [`CoreError::Conflict`](crate::error::CoreError::Conflict).
    async fn create(&self, input: CreateUser) -> CoreResult<User>;

    /// Apply the non-`None` fields. Returns `None` if the user does not exist.
    async fn update(&self, id: UserId, input: UpdateUser) -> CoreResult<Option<User>>;

    /// Delete a user and everything they own. Returns `true` if a row was removed.
    async fn delete(&self, id: UserId) -> CoreResult<bool>;
}

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a product for `owner_id`. An unknown owner is
    /// [`CoreError::NotFound`](crate::error::CoreError::NotFound).
    async fn create_for_owner(&self, owner_id: UserId, input: CreateProduct)
        -> CoreResult<Product>;

    /// Products owned by `owner_id`, ordered by id.
    async fn list_by_owner(&self, owner_id: UserId) -> CoreResult<Vec<Product>>;

    async fn get(&self, id: ProductId) -> CoreResult<Option<Product>>;

    async fn delete(&self, id: ProductId) -> CoreResult<bool>;
}
