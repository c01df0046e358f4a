//! Repository for the `products` table.

use sqlx::PgPool;
use uuid::Uuid;

use inka_core::models::product::CreateProduct;

use crate::models::product::ProductRow;

const COLUMNS: &str = "id, name_product, price, owner_id";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: Uuid,
        input: &CreateProduct,
    ) -> Result<ProductRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (name_product, price, owner_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(&input.name_product)
            .bind(input.price)
            .bind(owner_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's products, oldest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: Uuid,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE owner_id = $1 ORDER BY id");
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Returns `true` if the row was removed.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
