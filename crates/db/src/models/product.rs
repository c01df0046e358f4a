use sqlx::FromRow;
use uuid::Uuid;

use inka_core::models::product::Product;

/// Full row from the `products` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name_product: String,
    pub price: f64,
    pub owner_id: Uuid,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name_product: row.name_product,
            price: row.price,
            owner_id: row.owner_id,
        }
    }
}
