//! Authentication error types.

use thiserror::Error;

use crate::auth::token::TokenError;
use crate::error::CoreError;

/// A user directory could not answer a lookup.
#[derive(Debug, Error)]
#[error("user directory lookup failed: {0}")]
pub struct DirectoryError(pub String);

impl From<CoreError> for DirectoryError {
    fn from(err: CoreError) -> Self {
        Self(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("invalid password")]
    InvalidPassword,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error("internal authentication error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Whether this is an ordinary credential rejection, as opposed to an
    /// infrastructure failure.
    ///
    /// Rejections are reported to callers as a single generic
    /// "authentication failed" outcome; a malformed token is a rejection too.
    pub fn is_rejection(&self) -> bool {
        match self {
            AuthError::UserNotFound | AuthError::InvalidPassword => true,
            AuthError::InvalidToken(TokenError::Signing(_) | TokenError::Config(_)) => false,
            AuthError::InvalidToken(_) => true,
            AuthError::Directory(_) | AuthError::Internal(_) => false,
        }
    }
}
