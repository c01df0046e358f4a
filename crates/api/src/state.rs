use std::sync::Arc;

use inka_core::auth::{Authenticator, TokenError, TokenIssuer, UserDirectory};
use inka_core::memory::MemoryStore;
use inka_core::repository::{ProductRepository, UserRepository};
use inka_db::{DbPool, PgStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// User storage (in-memory or PostgreSQL, chosen at startup).
    pub users: Arc<dyn UserRepository>,
    /// Product storage, backed by the same store as `users`.
    pub products: Arc<dyn ProductRepository>,
    /// Credential checks and bearer-token resolution.
    pub auth: Authenticator,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Database pool, present only for the PostgreSQL backend.
    pub pool: Option<DbPool>,
}

impl AppState {
    /// State backed by a fresh, empty [`MemoryStore`].
    pub fn in_memory(config: ServerConfig) -> Result<Self, TokenError> {
        Self::with_store(Arc::new(MemoryStore::new()), config, None)
    }

    /// State backed by PostgreSQL through `pool`.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Result<Self, TokenError> {
        Self::with_store(Arc::new(PgStore::new(pool.clone())), config, Some(pool))
    }

    fn with_store<S>(
        store: Arc<S>,
        config: ServerConfig,
        pool: Option<DbPool>,
    ) -> Result<Self, TokenError>
    where
        S: UserRepository + ProductRepository + UserDirectory + 'static,
    {
        let tokens = Arc::new(TokenIssuer::new(&config.jwt)?);
        let directory: Arc<dyn UserDirectory> = store.clone();

        Ok(Self {
            users: store.clone(),
            products: store,
            auth: Authenticator::new(directory, tokens),
            config: Arc::new(config),
            pool,
        })
    }
}
