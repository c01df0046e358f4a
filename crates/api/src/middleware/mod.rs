//! Request extractors and middleware.
//!
//! - [`auth::AuthUser`] -- Resolves the caller from a Bearer token.
//! - [`timing::process_time`] -- Adds the `x-process-time` response header.

pub mod auth;
pub mod timing;
