//! In-memory storage backend.
//!
//! Users get random UUIDs, products a counter starting at 1. Everything lives
//! behind `tokio` read/write locks and vanishes with the process.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::auth::{DirectoryError, StoredIdentity, UserDirectory};
use crate::error::{CoreError, CoreResult};
use crate::models::product::{CreateProduct, Product};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repository::{ProductRepository, UserRepository};
use crate::types::{ProductId, UserId};

#[derive(Default)]
struct Products {
    next_id: ProductId,
    rows: BTreeMap<ProductId, Product>,
}

/// Users and products held in process memory.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<UserId, User>>,
    products: RwLock<Products>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self) -> CoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn get(&self, id: UserId) -> CoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> CoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, input: CreateUser) -> CoreResult<User> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == input.username) {
            return Err(CoreError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            city: input.city,
            username: input.username,
            password_hash: input.password_hash,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: UserId, input: UpdateUser) -> CoreResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            input.apply_to(user);
            user.clone()
        }))
    }

    async fn delete(&self, id: UserId) -> CoreResult<bool> {
        // Lock order: users, then products.
        let mut users = self.users.write().await;
        if users.remove(&id).is_none() {
            return Ok(false);
        }
        self.products
            .write()
            .await
            .rows
            .retain(|_, p| p.owner_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ProductRepository for MemoryStore {
    async fn create_for_owner(
        &self,
        owner_id: UserId,
        input: CreateProduct,
    ) -> CoreResult<Product> {
        let users = self.users.read().await;
        if !users.contains_key(&owner_id) {
            return Err(CoreError::NotFound {
                entity: "User",
                id: owner_id.to_string(),
            });
        }

        let mut products = self.products.write().await;
        products.next_id += 1;
        let product = Product {
            id: products.next_id,
            name_product: input.name_product,
            price: input.price,
            owner_id,
        };
        products.rows.insert(product.id, product.clone());
        Ok(product)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> CoreResult<Vec<Product>> {
        Ok(self
            .products
            .read()
            .await
            .rows
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: ProductId) -> CoreResult<Option<Product>> {
        Ok(self.products.read().await.rows.get(&id).cloned())
    }

    async fn delete(&self, id: ProductId) -> CoreResult<bool> {
        Ok(self.products.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl UserDirectory for MemoryStore {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredIdentity>, DirectoryError> {
        let user = UserRepository::find_by_username(self, identifier).await?;
        Ok(user.map(|u| u.identity()))
    }
}
