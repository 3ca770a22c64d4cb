//! # Product Repository
//!
//! Database operations for the product catalog and stock levels.
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Product Search Works                             │
//! │                                                                         │
//! │  User types: "café"                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LIKE '%café%' across: name, description, category, barcode            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │ Café Torrado 500g  | Mercearia | 789... │ ← MATCH!                  │
//! │  │ Café Solúvel 200g  | Mercearia | 789... │ ← MATCH!                  │
//! │  │ Açúcar Cristal 1kg | Mercearia | 789... │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! │  A counter catalog stays in the hundreds of rows, so a LIKE scan       │
//! │  over the indexed name column is instant.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use balcao_core::types::Product;

/// Input for creating a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Price in centavos.
    pub price_cents: i64,
    /// Initial stock level.
    pub quantity: i64,
    /// Restock alert threshold.
    pub min_quantity: i64,
    pub supplier: Option<String>,
    pub barcode: Option<String>,
}

const PRODUCT_COLUMNS: &str = "id, name, description, category, price_cents, quantity, \
     min_quantity, supplier, barcode, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Search products
/// let results = repo.search("café", 20).await?;
///
/// // Get by ID
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - Barcode already exists
    pub async fn insert(&self, new_product: &NewProduct) -> DbResult<Product> {
        debug!(name = %new_product.name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, description, category, price_cents,
                quantity, min_quantity, supplier, barcode,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(&new_product.name)
        .bind(&new_product.description)
        .bind(&new_product.category)
        .bind(new_product.price_cents)
        .bind(new_product.quantity)
        .bind(new_product.min_quantity)
        .bind(&new_product.supplier)
        .bind(&new_product.barcode)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: new_product.name.clone(),
            description: new_product.description.clone(),
            category: new_product.category.clone(),
            price_cents: new_product.price_cents,
            quantity: new_product.quantity,
            min_quantity: new_product.min_quantity,
            supplier: new_product.supplier.clone(),
            barcode: new_product.barcode.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its barcode.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?1"
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists all products, ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products with stock available, for the billing screen picker.
    ///
    /// Products at zero (or negative) stock are hidden here but stay
    /// visible in the full catalog listing.
    pub async fn list_in_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity > 0 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Lists products at or below their restock threshold.
    pub async fn list_low_stock(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE quantity <= min_quantity ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Searches products by name, description, category or barcode
    /// (substring match, case-insensitive for ASCII per SQLite LIKE
    /// semantics).
    ///
    /// ## Arguments
    /// * `query` - Search term (can be partial)
    /// * `limit` - Maximum results to return
    ///
    /// An empty query returns the full listing up to `limit`.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit, "Searching products");

        if query.is_empty() {
            let products = sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name LIMIT ?1"
            ))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
            return Ok(products);
        }

        let pattern = format!("%{}%", query);

        let products = sqlx::query_as::<_, Product>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE name LIKE ?1 OR description LIKE ?1
               OR category LIKE ?1 OR barcode LIKE ?1
            ORDER BY name
            LIMIT ?2
            "#
        ))
        .bind(&pattern)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Updates an existing product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product doesn't exist
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        debug!(id = product.id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                category = ?4,
                price_cents = ?5,
                quantity = ?6,
                min_quantity = ?7,
                supplier = ?8,
                barcode = ?9,
                updated_at = ?10
            WHERE id = ?1
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.category)
        .bind(product.price_cents)
        .bind(product.quantity)
        .bind(product.min_quantity)
        .bind(&product.supplier)
        .bind(&product.barcode)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", product.id));
        }

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product doesn't exist
    /// * `DbError::ForeignKeyViolation` - Product appears in sale history;
    ///   history is never rewritten, so such products cannot be removed
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_repo() -> ProductRepository {
        let db = crate::pool::Database::new(crate::pool::DbConfig::in_memory())
            .await
            .unwrap();
        db.products()
    }

    fn sample(name: &str, price_cents: i64, quantity: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: None,
            category: Some("Mercearia".to_string()),
            price_cents,
            quantity,
            min_quantity: 2,
            supplier: Some("Distribuidora Sul".to_string()),
            barcode: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = test_repo().await;

        let created = repo.insert(&sample("Café 500g", 1000, 10)).await.unwrap();
        assert!(created.id > 0);

        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Café 500g");
        assert_eq!(fetched.price_cents, 1000);
        assert_eq!(fetched.quantity, 10);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_in_stock_hides_depleted_products() {
        let repo = test_repo().await;
        repo.insert(&sample("Café 500g", 1000, 10)).await.unwrap();
        repo.insert(&sample("Açúcar 1kg", 500, 0)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 2);

        let available = repo.list_in_stock().await.unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name, "Café 500g");
    }

    #[tokio::test]
    async fn test_search_matches_name_substring() {
        let repo = test_repo().await;
        repo.insert(&sample("Café Torrado 500g", 1000, 10)).await.unwrap();
        repo.insert(&sample("Café Solúvel 200g", 1200, 5)).await.unwrap();
        repo.insert(&sample("Arroz 5kg", 2500, 8)).await.unwrap();

        let hits = repo.search("Café", 20).await.unwrap();
        assert_eq!(hits.len(), 2);

        // Empty query falls back to the full listing.
        let all = repo.search("  ", 20).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repo = test_repo().await;
        let mut product = repo.insert(&sample("Café 500g", 1000, 10)).await.unwrap();

        product.price_cents = 1100;
        product.quantity = 12;
        repo.update(&product).await.unwrap();

        let fetched = repo.get_by_id(product.id).await.unwrap().unwrap();
        assert_eq!(fetched.price_cents, 1100);
        assert_eq!(fetched.quantity, 12);

        repo.delete(product.id).await.unwrap();
        assert!(repo.get_by_id(product.id).await.unwrap().is_none());

        let err = repo.delete(product.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_low_stock_listing() {
        let repo = test_repo().await;
        repo.insert(&sample("Café 500g", 1000, 1)).await.unwrap();
        repo.insert(&sample("Arroz 5kg", 2500, 8)).await.unwrap();

        let low = repo.list_low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Café 500g");
    }
}
