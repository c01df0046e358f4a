//! Inka core: domain models, storage abstractions, and the credential &
//! token service.
//!
//! - [`auth`] -- password hashing, access-token issuance and verification,
//!   and the authenticator that ties them to a user directory.
//! - [`repository`] -- storage traits implemented by [`memory::MemoryStore`]
//!   and the PostgreSQL store in `inka-db`.

pub mod auth;
pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod types;
