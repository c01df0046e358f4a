//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, UserId};

/// A product owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name_product: String,
    pub price: f64,
    pub owner_id: UserId,
}

/// DTO for creating a product under an owner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name_product: String,
    pub price: f64,
}
