//! Credential & token service.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- signed, time-limited bearer tokens.
//! - [`authenticator`] -- credential checks and token-to-identity resolution
//!   against a [`UserDirectory`].

pub mod authenticator;
pub mod error;
pub mod password;
pub mod token;

pub use authenticator::{Authenticator, StoredIdentity, UserDirectory};
pub use error::{AuthError, DirectoryError};
pub use token::{AccessToken, Claims, TokenConfig, TokenError, TokenIssuer};
