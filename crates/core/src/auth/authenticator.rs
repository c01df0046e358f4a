//! Credential verification and token-to-identity resolution.
//!
//! The [`Authenticator`] moves a caller from unauthenticated to either
//! authenticated (returning the [`StoredIdentity`]) or rejected (returning an
//! [`AuthError`]). It holds no mutable state: every call performs one
//! directory read and one cryptographic check.

use std::sync::Arc;

use async_trait::async_trait;

use crate::auth::error::{AuthError, DirectoryError};
use crate::auth::password::verify_password;
use crate::auth::token::{AccessToken, TokenIssuer};
use crate::types::UserId;

/// The credential-relevant part of a user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdentity {
    pub id: UserId,
    /// Unique login name.
    pub identifier: String,
    /// Salted one-way hash in PHC format.
    pub password_hash: String,
}

/// Read-only lookup of identities by their unique identifier.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<StoredIdentity>, DirectoryError>;
}

/// Verifies credentials and bearer tokens against a [`UserDirectory`].
#[derive(Clone)]
pub struct Authenticator {
    directory: Arc<dyn UserDirectory>,
    tokens: Arc<TokenIssuer>,
}

impl Authenticator {
    pub fn new(directory: Arc<dyn UserDirectory>, tokens: Arc<TokenIssuer>) -> Self {
        Self { directory, tokens }
    }

    /// The issuer used for [`login`](Self::login).
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Check a username/password pair.
    ///
    /// The hash comparison runs on the blocking pool since Argon2 is
    /// deliberately slow.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<StoredIdentity, AuthError> {
        let identity = self
            .directory
            .find_by_identifier(username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username, "Authentication rejected: unknown user");
                AuthError::UserNotFound
            })?;

        let candidate = password.to_owned();
        let hash = identity.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&candidate, &hash))
            .await
            .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?;

        if !matches {
            tracing::warn!(username, "Authentication rejected: wrong password");
            return Err(AuthError::InvalidPassword);
        }

        tracing::info!(username, user_id = %identity.id, "User authenticated");
        Ok(identity)
    }

    /// Authenticate and, on success, issue an access token for the identity.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(StoredIdentity, AccessToken), AuthError> {
        let identity = self.authenticate(username, password).await?;
        let token = self.tokens.issue(&identity.identifier)?;
        Ok((identity, token))
    }

    /// Resolve a bearer token to the identity it was issued for.
    pub async fn resolve_current_identity(&self, token: &str) -> Result<StoredIdentity, AuthError> {
        let claims = self.tokens.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token refused");
            AuthError::InvalidToken(e)
        })?;

        self.directory
            .find_by_identifier(&claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::warn!(subject = %claims.sub, "Token subject no longer exists");
                AuthError::UserNotFound
            })
    }
}
