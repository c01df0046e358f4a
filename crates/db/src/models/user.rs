use sqlx::FromRow;
use uuid::Uuid;

use inka_core::models::user::User;

/// Full row from the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub username: String,
    pub password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            city: row.city,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}
