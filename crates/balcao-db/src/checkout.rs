//! # Checkout Transaction
//!
//! Atomic sale finalization: the single write path that turns a cart into
//! persisted sale history.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sale Finalization                                   │
//! │                                                                         │
//! │  finalize(pool, cart, details)                                         │
//! │       │                                                                 │
//! │       ├── cart empty? ──► Err(EmptyCart), nothing touched              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN TRANSACTION                                                     │
//! │       │                                                                 │
//! │       ├── INSERT sales (header with subtotal/discount/total)           │
//! │       │        └── sale_id = last_insert_rowid()                       │
//! │       │                                                                 │
//! │       ├── for each cart line:                                          │
//! │       │        ├── INSERT sale_items (price snapshot)                  │
//! │       │        └── UPDATE products SET quantity = quantity - N         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT ──► Ok(Sale)                                                   │
//! │                                                                         │
//! │  Any step fails ──► transaction dropped ──► full rollback              │
//! │  (no sale row, no item rows, no stock change)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Decrement
//! The decrement is unconditional: `quantity = quantity - N` with no floor.
//! Stock can go negative when the cart merged lines past the available
//! stock. The billing screen hides out-of-stock products, so this is a
//! visible oversell signal rather than a silent clamp.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{debug, info};

use balcao_core::cart::Cart;
use balcao_core::money::Money;
use balcao_core::types::{PaymentMethod, Sale, DEFAULT_CUSTOMER};

use crate::error::DbError;

// =============================================================================
// Checkout Details
// =============================================================================

/// Everything the operator chose on the billing screen, besides the cart.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    /// Customer name; blank falls back to the walk-in sentinel.
    pub customer_name: String,
    /// Customer document (CPF/CNPJ), free-form, may be empty.
    pub customer_doc: String,
    /// Already-parsed discount. Lenient parsing happens upstream.
    pub discount: Money,
    pub payment_method: PaymentMethod,
    /// The logged-in operator.
    pub user_id: i64,
}

// =============================================================================
// Checkout Error
// =============================================================================

/// Sale finalization errors.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Finalization was attempted on an empty cart. Checked before the
    /// transaction is opened; no database call is made.
    #[error("the cart is empty")]
    EmptyCart,

    /// The transaction failed and was rolled back.
    #[error(transparent)]
    Db(#[from] DbError),
}

// =============================================================================
// Finalize
// =============================================================================

/// Finalizes a sale: persists the header, its item lines and the stock
/// decrements in one transaction.
///
/// ## Guarantees
/// - Empty cart: `Err(EmptyCart)`, zero database writes
/// - Any insert/update fails: everything rolls back, stock untouched
/// - Success: returned `Sale` carries the assigned rowid and the exact
///   persisted totals (`total = max(0, subtotal - discount)`)
pub async fn finalize(
    pool: &SqlitePool,
    cart: &Cart,
    details: &CheckoutDetails,
) -> Result<Sale, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let subtotal = cart.subtotal();
    let total = cart.total(details.discount);
    let now = Utc::now();

    let customer_name = {
        let trimmed = details.customer_name.trim();
        if trimmed.is_empty() {
            DEFAULT_CUSTOMER.to_string()
        } else {
            trimmed.to_string()
        }
    };
    let customer_doc = details.customer_doc.trim().to_string();

    debug!(
        items = cart.len(),
        subtotal = subtotal.cents(),
        total = total.cents(),
        "Finalizing sale"
    );

    // Rollback is automatic: dropping an uncommitted Transaction rolls it
    // back, so every early `?` below leaves the database untouched.
    let mut tx: Transaction<'_, Sqlite> = pool.begin().await.map_err(DbError::from)?;

    let result = sqlx::query(
        r#"
        INSERT INTO sales (
            sale_date, customer_name, customer_doc,
            subtotal_cents, discount_cents, total_cents,
            payment_method, user_id
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(now)
    .bind(&customer_name)
    .bind(&customer_doc)
    .bind(subtotal.cents())
    .bind(details.discount.cents())
    .bind(total.cents())
    .bind(details.payment_method)
    .bind(details.user_id)
    .execute(&mut *tx)
    .await
    .map_err(DbError::from)?;

    let sale_id = result.last_insert_rowid();

    for line in cart.lines() {
        sqlx::query(
            r#"
            INSERT INTO sale_items (
                sale_id, product_id, quantity,
                unit_price_cents, total_price_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sale_id)
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(line.unit_price.cents())
        .bind(line.line_total().cents())
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        // Unconditional decrement, no floor at zero.
        sqlx::query(
            r#"
            UPDATE products
            SET quantity = quantity - ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(line.product_id)
        .bind(line.quantity)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;
    }

    tx.commit().await.map_err(DbError::from)?;

    info!(sale_id, total = total.cents(), "Sale finalized");

    Ok(Sale {
        id: sale_id,
        sale_date: now,
        customer_name,
        customer_doc,
        subtotal_cents: subtotal.cents(),
        discount_cents: details.discount.cents(),
        total_cents: total.cents(),
        payment_method: details.payment_method,
        user_id: details.user_id,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::NewProduct;
    use crate::repository::user::NewUser;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_operator(db: &Database) -> i64 {
        db.users()
            .create(&NewUser {
                username: "caixa1".to_string(),
                password: "senha".to_string(),
                full_name: "Operador Um".to_string(),
                email: None,
                is_admin: false,
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64, quantity: i64) -> i64 {
        db.products()
            .insert(&NewProduct {
                name: name.to_string(),
                description: None,
                category: Some("Mercearia".to_string()),
                price_cents,
                quantity,
                min_quantity: 2,
                supplier: None,
                barcode: None,
            })
            .await
            .unwrap()
            .id
    }

    fn details(user_id: i64, discount_cents: i64) -> CheckoutDetails {
        CheckoutDetails {
            customer_name: "Maria Silva".to_string(),
            customer_doc: String::new(),
            discount: Money::from_cents(discount_cents),
            payment_method: PaymentMethod::Pix,
            user_id,
        }
    }

    #[tokio::test]
    async fn test_finalize_persists_sale_items_and_stock() {
        let db = test_db().await;
        let user_id = seed_operator(&db).await;
        let cafe = seed_product(&db, "Café 500g", 1000, 10).await;
        let acucar = seed_product(&db, "Açúcar 1kg", 500, 5).await;

        let mut cart = Cart::new();
        cart.add(cafe, "Café 500g", Money::from_cents(1000), 10, 2).unwrap();
        cart.add(acucar, "Açúcar 1kg", Money::from_cents(500), 5, 1).unwrap();

        // Subtotal 25.00, discount 3.00 → total 22.00.
        let sale = finalize(db.pool(), &cart, &details(user_id, 300))
            .await
            .unwrap();

        assert_eq!(sale.subtotal_cents, 2500);
        assert_eq!(sale.discount_cents, 300);
        assert_eq!(sale.total_cents, 2200);

        // Persisted header matches what was returned.
        let stored = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored.total_cents, 2200);
        assert_eq!(stored.customer_name, "Maria Silva");

        // Item lines carry price snapshots.
        let items = db.sales().items(sale.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].total_price_cents, 2000);
        assert_eq!(items[1].total_price_cents, 500);

        // Stock decremented.
        let cafe = db.products().get_by_id(cafe).await.unwrap().unwrap();
        let acucar = db.products().get_by_id(acucar).await.unwrap().unwrap();
        assert_eq!(cafe.quantity, 8);
        assert_eq!(acucar.quantity, 4);
    }

    #[tokio::test]
    async fn test_finalize_empty_cart_writes_nothing() {
        let db = test_db().await;
        let user_id = seed_operator(&db).await;

        let err = finalize(db.pool(), &Cart::new(), &details(user_id, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::EmptyCart));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_finalize_failure_rolls_back_everything() {
        let db = test_db().await;
        let user_id = seed_operator(&db).await;
        let cafe = seed_product(&db, "Café 500g", 1000, 10).await;

        // Second line references a product that does not exist; its
        // sale_items insert violates the foreign key after the first
        // line already decremented stock inside the transaction.
        let mut cart = Cart::new();
        cart.add(cafe, "Café 500g", Money::from_cents(1000), 10, 2).unwrap();
        cart.add(9999, "Fantasma", Money::from_cents(100), 10, 1).unwrap();

        let err = finalize(db.pool(), &cart, &details(user_id, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckoutError::Db(_)));

        // Nothing survived the rollback.
        assert_eq!(db.sales().count().await.unwrap(), 0);
        let orphan_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sale_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphan_items, 0);
        let cafe = db.products().get_by_id(cafe).await.unwrap().unwrap();
        assert_eq!(cafe.quantity, 10);
    }

    #[tokio::test]
    async fn test_finalize_blank_customer_uses_sentinel() {
        let db = test_db().await;
        let user_id = seed_operator(&db).await;
        let cafe = seed_product(&db, "Café 500g", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add(cafe, "Café 500g", Money::from_cents(1000), 10, 1).unwrap();

        let mut d = details(user_id, 0);
        d.customer_name = "   ".to_string();

        let sale = finalize(db.pool(), &cart, &d).await.unwrap();
        assert_eq!(sale.customer_name, DEFAULT_CUSTOMER);

        let stored = db.sales().get_by_id(sale.id).await.unwrap().unwrap();
        assert_eq!(stored.customer_name, DEFAULT_CUSTOMER);
    }

    #[tokio::test]
    async fn test_finalize_oversized_discount_floors_total_at_zero() {
        let db = test_db().await;
        let user_id = seed_operator(&db).await;
        let cafe = seed_product(&db, "Café 500g", 1000, 10).await;

        let mut cart = Cart::new();
        cart.add(cafe, "Café 500g", Money::from_cents(1000), 10, 1).unwrap();

        let sale = finalize(db.pool(), &cart, &details(user_id, 99_999))
            .await
            .unwrap();
        assert_eq!(sale.subtotal_cents, 1000);
        assert_eq!(sale.total_cents, 0);
    }

    #[tokio::test]
    async fn test_finalize_merged_lines_can_drive_stock_negative() {
        let db = test_db().await;
        let user_id = seed_operator(&db).await;
        let cafe = seed_product(&db, "Café 500g", 1000, 3).await;

        // Each add fits the stock; the merged quantity does not. The
        // decrement is unconditional, so the oversell lands as negative
        // stock instead of an error.
        let mut cart = Cart::new();
        cart.add(cafe, "Café 500g", Money::from_cents(1000), 3, 2).unwrap();
        cart.add(cafe, "Café 500g", Money::from_cents(1000), 3, 2).unwrap();

        finalize(db.pool(), &cart, &details(user_id, 0))
            .await
            .unwrap();

        let cafe = db.products().get_by_id(cafe).await.unwrap().unwrap();
        assert_eq!(cafe.quantity, -1);
    }
}
