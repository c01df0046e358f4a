//! Row types as read from PostgreSQL.

pub mod product;
pub mod user;
