//! # Cart Commands
//!
//! Cart manipulation on the billing screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Discount │────►│ Finalized│       │
//! │  │  Cart    │     │          │     │  Typed   │     │   Sale   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                              │
//! │                   add_to_cart       finalize_sale                      │
//! │                   remove_from_cart  (sale.rs)                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use balcao_core::cart::{Cart, CartLine};
use balcao_core::money::Money;
use balcao_db::Database;

use crate::error::PosError;
use crate::state::CartState;

/// Live totals under the cart table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl CartResponse {
    fn build(cart: &Cart, discount: Money) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals {
                item_count: cart.len(),
                total_quantity: cart.lines().iter().map(|l| l.quantity).sum(),
                subtotal_cents: cart.subtotal().cents(),
                discount_cents: discount.cents(),
                total_cents: cart.total(discount).cents(),
            },
        }
    }
}

/// Gets the current cart with totals for the discount field as typed.
///
/// The discount box accepts anything; garbage coerces to zero so the
/// totals keep updating on every keystroke.
pub fn get_cart(cart: &CartState, discount_input: &str) -> CartResponse {
    let discount = Money::parse_lenient(discount_input);
    cart.with_cart(|c| CartResponse::build(c, discount))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Product is looked up fresh; name and price are frozen into the line
/// - Already in cart: quantities merge into the existing line
/// - Quantity must be positive and within the stock observed right now
///
/// ## Errors
/// - `NOT_FOUND` - no such product
/// - `VALIDATION_ERROR` - non-positive quantity or more than the stock
pub async fn add_to_cart(
    db: &Database,
    cart: &CartState,
    product_id: i64,
    quantity: i64,
) -> Result<CartResponse, PosError> {
    debug!(product_id, quantity, "add_to_cart command");

    let product = db
        .products()
        .get_by_id(product_id)
        .await?
        .ok_or_else(|| PosError::not_found("Product", product_id))?;

    cart.with_cart_mut(|c| {
        c.add(
            product.id,
            &product.name,
            product.price(),
            product.quantity,
            quantity,
        )
    })?;

    Ok(cart.with_cart(|c| CartResponse::build(c, Money::zero())))
}

/// Removes a line from the cart. Removing an absent product is a no-op.
pub fn remove_from_cart(cart: &CartState, product_id: i64) -> CartResponse {
    debug!(product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove(product_id);
        CartResponse::build(c, Money::zero())
    })
}

/// Clears all lines from the cart.
///
/// ## When Used
/// - Operator cancels the sale
/// - After a sale is finalized (new transaction)
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::build(c, Money::zero())
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::PosApp;
    use balcao_db::NewProduct;

    async fn app_with_product(quantity: i64) -> (PosApp, i64) {
        let app = PosApp::start_in_memory().await.unwrap();
        let product = app
            .db
            .products()
            .insert(&NewProduct {
                name: "Café 500g".to_string(),
                description: None,
                category: None,
                price_cents: 1000,
                quantity,
                min_quantity: 2,
                supplier: None,
                barcode: None,
            })
            .await
            .unwrap();
        (app, product.id)
    }

    #[tokio::test]
    async fn test_add_and_totals_with_lenient_discount() {
        let (app, product_id) = app_with_product(10).await;

        let response = add_to_cart(&app.db, &app.cart, product_id, 2).await.unwrap();
        assert_eq!(response.totals.subtotal_cents, 2000);

        // Valid discount entry.
        let response = get_cart(&app.cart, "3,00");
        assert_eq!(response.totals.discount_cents, 300);
        assert_eq!(response.totals.total_cents, 1700);

        // Garbage coerces to zero instead of erroring.
        let response = get_cart(&app.cart, "abc");
        assert_eq!(response.totals.discount_cents, 0);
        assert_eq!(response.totals.total_cents, 2000);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (app, _) = app_with_product(10).await;

        let err = add_to_cart(&app.db, &app.cart, 9999, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_add_over_stock_is_rejected() {
        let (app, product_id) = app_with_product(3).await;

        let err = add_to_cart(&app.db, &app.cart, product_id, 5).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(app.cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (app, product_id) = app_with_product(10).await;
        add_to_cart(&app.db, &app.cart, product_id, 1).await.unwrap();

        // Removing something absent is silent.
        let response = remove_from_cart(&app.cart, 424242);
        assert_eq!(response.totals.item_count, 1);

        let response = clear_cart(&app.cart);
        assert_eq!(response.totals.item_count, 0);
        assert_eq!(response.totals.total_cents, 0);
    }
}
