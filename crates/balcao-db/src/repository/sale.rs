//! # Sale Repository
//!
//! Read access to finalized sales.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │  1. FINALIZE (crate::checkout, the only write path)                    │
//! │     └── one transaction: sales + sale_items + stock decrement          │
//! │                                                                         │
//! │  2. READ BACK (this repository)                                        │
//! │     ├── get_by_id()       → Sale header                                │
//! │     ├── get_with_items()  → header + joined item lines + cashier       │
//! │     └── list()            → history screen summaries                   │
//! │                                                                         │
//! │  Sales are immutable once written; there is no update or delete.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use balcao_core::types::{PaymentMethod, Sale, SaleItem};

// =============================================================================
// Row Shapes
// =============================================================================

/// One row of the sale history screen.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SaleSummary {
    pub id: i64,
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    /// Full name of the operator who rang the sale up.
    pub cashier: String,
}

/// A sale item joined with its product name, ready for receipt rendering.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SaleItemDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
}

/// A sale header with everything a receipt needs.
#[derive(Debug, Clone, Serialize)]
pub struct SaleDetails {
    pub sale: Sale,
    pub items: Vec<SaleItemDetail>,
    pub cashier: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Gets a sale header by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_date, customer_name, customer_doc,
                   subtotal_cents, discount_cents, total_cents,
                   payment_method, user_id
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Gets a sale with its item lines and the cashier's name, the exact
    /// shape receipt projection needs.
    ///
    /// ## Returns
    /// * `Ok(Some(SaleDetails))` - Sale found
    /// * `Ok(None)` - No such sale
    pub async fn get_with_items(&self, id: i64) -> DbResult<Option<SaleDetails>> {
        let Some(sale) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleItemDetail>(
            r#"
            SELECT si.product_id,
                   p.name AS product_name,
                   si.quantity,
                   si.unit_price_cents,
                   si.total_price_cents
            FROM sale_items si
            INNER JOIN products p ON p.id = si.product_id
            WHERE si.sale_id = ?1
            ORDER BY si.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let cashier: String = sqlx::query_scalar("SELECT full_name FROM users WHERE id = ?1")
            .bind(sale.user_id)
            .fetch_one(&self.pool)
            .await?;

        debug!(sale_id = id, items = items.len(), "Loaded sale for receipt");

        Ok(Some(SaleDetails {
            sale,
            items,
            cashier,
        }))
    }

    /// Gets the raw item rows of a sale.
    pub async fn items(&self, sale_id: i64) -> DbResult<Vec<SaleItem>> {
        let items = sqlx::query_as::<_, SaleItem>(
            r#"
            SELECT id, sale_id, product_id, quantity,
                   unit_price_cents, total_price_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists recent sales for the history screen, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<SaleSummary>> {
        let sales = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT s.id, s.sale_date, s.customer_name, s.total_cents,
                   s.payment_method,
                   u.full_name AS cashier
            FROM sales s
            INNER JOIN users u ON u.id = s.user_id
            ORDER BY s.sale_date DESC, s.id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Counts finalized sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
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
    use crate::checkout::CheckoutDetails;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::NewProduct;
    use crate::repository::user::NewUser;
    use balcao_core::cart::Cart;
    use balcao_core::money::Money;

    async fn db_with_one_sale() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let user = db
            .users()
            .create(&NewUser {
                username: "caixa1".to_string(),
                password: "senha".to_string(),
                full_name: "Operador Um".to_string(),
                email: None,
                is_admin: false,
            })
            .await
            .unwrap();

        let cafe = db
            .products()
            .insert(&NewProduct {
                name: "Café 500g".to_string(),
                description: None,
                category: None,
                price_cents: 1000,
                quantity: 10,
                min_quantity: 2,
                supplier: None,
                barcode: None,
            })
            .await
            .unwrap();

        let mut cart = Cart::new();
        cart.add(cafe.id, &cafe.name, cafe.price(), cafe.quantity, 2).unwrap();

        let sale = db
            .checkout(
                &cart,
                &CheckoutDetails {
                    customer_name: "Maria Silva".to_string(),
                    customer_doc: String::new(),
                    discount: Money::from_cents(300),
                    payment_method: PaymentMethod::Cash,
                    user_id: user.id,
                },
            )
            .await
            .unwrap();

        (db, sale.id)
    }

    #[tokio::test]
    async fn test_get_with_items_joins_names() {
        let (db, sale_id) = db_with_one_sale().await;

        let details = db.sales().get_with_items(sale_id).await.unwrap().unwrap();
        assert_eq!(details.sale.total_cents, 1700);
        assert_eq!(details.cashier, "Operador Um");
        assert_eq!(details.items.len(), 1);
        assert_eq!(details.items[0].product_name, "Café 500g");
        assert_eq!(details.items[0].total_price_cents, 2000);

        assert!(db.sales().get_with_items(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_summaries() {
        let (db, sale_id) = db_with_one_sale().await;

        let summaries = db.sales().list(10).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].id, sale_id);
        assert_eq!(summaries[0].customer_name, "Maria Silva");
        assert_eq!(summaries[0].total_cents, 1700);
        assert_eq!(summaries[0].cashier, "Operador Um");
    }
}
