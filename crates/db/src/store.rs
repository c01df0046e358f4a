//! [`PgStore`]: the storage traits on top of a connection pool.

use async_trait::async_trait;

use inka_core::auth::{DirectoryError, StoredIdentity, UserDirectory};
use inka_core::error::CoreResult;
use inka_core::models::product::{CreateProduct, Product};
use inka_core::models::user::{CreateUser, UpdateUser, User};
use inka_core::repository::{ProductRepository, UserRepository};
use inka_core::types::{ProductId, UserId};

use crate::error::classify;
use crate::repositories::{ProductRepo, UserRepo};
use crate::DbPool;

/// PostgreSQL-backed store. Cheap to clone (the pool is reference-counted).
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn list(&self) -> CoreResult<Vec<User>> {
        let rows = UserRepo::list(&self.pool)
            .await
            .map_err(|e| classify(e, "User", "*"))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get(&self, id: UserId) -> CoreResult<Option<User>> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| classify(e, "User", id))?;
        Ok(row.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        let row = UserRepo::find_by_username(&self.pool, username)
            .await
            .map_err(|e| classify(e, "User", username))?;
        Ok(row.map(User::from))
    }

    async fn create(&self, input: CreateUser) -> CoreResult<User> {
        let row = UserRepo::create(&self.pool, &input)
            .await
            .map_err(|e| classify(e, "User", &input.username))?;
        Ok(row.into())
    }

    async fn update(&self, id: UserId, input: UpdateUser) -> CoreResult<Option<User>> {
        let row = UserRepo::update(&self.pool, id, &input)
            .await
            .map_err(|e| classify(e, "User", id))?;
        Ok(row.map(User::from))
    }

    async fn delete(&self, id: UserId) -> CoreResult<bool> {
        UserRepo::delete(&self.pool, id)
            .await
            .map_err(|e| classify(e, "User", id))
    }
}

#[async_trait]
impl ProductRepository for PgStore {
    async fn create_for_owner(
        &self,
        owner_id: UserId,
        input: CreateProduct,
    ) -> CoreResult<Product> {
        // A missing owner trips the foreign key and comes back as NotFound.
        let row = ProductRepo::create(&self.pool, owner_id, &input)
            .await
            .map_err(|e| classify(e, "User", owner_id))?;
        Ok(row.into())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> CoreResult<Vec<Product>> {
        let rows = ProductRepo::list_by_owner(&self.pool, owner_id)
            .await
            .map_err(|e| classify(e, "User", owner_id))?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get(&self, id: ProductId) -> CoreResult<Option<Product>> {
        let row = ProductRepo::find_by_id(&self.pool, id)
            .await
            .map_err(|e| classify(e, "Product", id))?;
        Ok(row.map(Product::from))
    }

    async fn delete(&self, id: ProductId) -> CoreResult<bool> {
        ProductRepo::delete(&self.pool, id)
            .await
            .map_err(|e| classify(e, "Product", id))
    }
}

#[async_trait]
impl UserDirectory for PgStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredIdentity>, DirectoryError> {
        let user = UserRepository::find_by_username(self, identifier).await?;
        Ok(user.map(|u| u.identity()))
    }
}
