//! User entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::auth::StoredIdentity;
use crate::models::product::Product;
use crate::types::UserId;

/// Full user record as held by a store.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub username: String,
    pub password_hash: String,
}

impl User {
    /// The credential-relevant view of this user.
    pub fn identity(&self) -> StoredIdentity {
        StoredIdentity {
            id: self.id,
            identifier: self.username.clone(),
            password_hash: self.password_hash.clone(),
        }
    }
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub username: String,
    pub products: Vec<Product>,
}

impl UserResponse {
    pub fn new(user: User, products: Vec<Product>) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            city: user.city,
            username: user.username,
            products,
        }
    }
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub username: String,
    pub password_hash: String,
}

/// DTO for updating an existing user. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub city: Option<String>,
}

impl UpdateUser {
    /// Apply the non-`None` fields to `user` in place.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(first_name) = &self.first_name {
            user.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &self.last_name {
            user.last_name.clone_from(last_name);
        }
        if let Some(city) = &self.city {
            user.city.clone_from(city);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: uuid::Uuid::new_v4(),
            first_name: "Juana".to_string(),
            last_name: "Falcon".to_string(),
            city: "Trujillo".to_string(),
            username: "jfalcon".to_string(),
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[test]
    fn update_applies_only_present_fields() {
        let mut user = sample_user();
        let update = UpdateUser {
            city: Some("Lima".to_string()),
            ..Default::default()
        };
        update.apply_to(&mut user);

        assert_eq!(user.city, "Lima");
        assert_eq!(user.first_name, "Juana");
        assert_eq!(user.last_name, "Falcon");
    }

    #[test]
    fn response_omits_password_hash() {
        let json = serde_json_value(UserResponse::new(sample_user(), Vec::new()));
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "jfalcon");
    }

    fn serde_json_value(response: UserResponse) -> serde_json::Value {
        serde_json::to_value(response).expect("serialization should succeed")
    }
}
