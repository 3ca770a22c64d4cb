//! # Sale Commands
//!
//! Finalization and sale history.
//!
//! ## Finalize Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operator presses "Finalizar Venda"                                    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  finalize_sale(db, cart, session, request)                             │
//! │                    │                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. Snapshot the cart (checkout sees a frozen copy)            │    │
//! │  │  2. Parse the discount box leniently (garbage → R$ 0.00)       │    │
//! │  │  3. One atomic transaction (balcao-db::checkout)               │    │
//! │  │  4. Clear the cart — only after the commit succeeded           │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  Sale { id, totals } → receipt screen                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Deserialize;
use tracing::{debug, info};

use balcao_core::money::Money;
use balcao_core::types::{PaymentMethod, Sale};
use balcao_db::{CheckoutDetails, Database, SaleDetails, SaleSummary};

use crate::error::PosError;
use crate::session::Session;
use crate::state::CartState;

/// What the operator filled in on the finalize dialog.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeRequest {
    /// May be blank; the walk-in sentinel is applied downstream.
    pub customer_name: String,
    pub customer_doc: String,
    /// Raw text from the discount box, parsed leniently.
    pub discount_input: String,
    pub payment_method: PaymentMethod,
}

/// Finalizes the current cart as a sale.
///
/// The cart is cleared only after the transaction commits; on any error
/// the operator still has the cart to retry with.
///
/// ## Errors
/// - `EMPTY_CART` - nothing in the cart, nothing persisted
/// - `DATABASE_ERROR` - transaction failed and was rolled back
pub async fn finalize_sale(
    db: &Database,
    cart: &CartState,
    session: &Session,
    request: FinalizeRequest,
) -> Result<Sale, PosError> {
    debug!(operator = %session.user().username, "finalize_sale command");

    let snapshot = cart.snapshot();
    let discount = Money::parse_lenient(&request.discount_input);

    let sale = db
        .checkout(
            &snapshot,
            &CheckoutDetails {
                customer_name: request.customer_name,
                customer_doc: request.customer_doc,
                discount,
                payment_method: request.payment_method,
                user_id: session.user_id(),
            },
        )
        .await?;

    cart.with_cart_mut(|c| c.clear());

    info!(sale_id = sale.id, total = sale.total_cents, "Sale finalized");
    Ok(sale)
}

/// Lists recent sales for the history screen, newest first.
pub async fn list_sales(db: &Database, limit: u32) -> Result<Vec<SaleSummary>, PosError> {
    Ok(db.sales().list(limit).await?)
}

/// Loads one sale with its items and cashier.
pub async fn get_sale(db: &Database, sale_id: i64) -> Result<SaleDetails, PosError> {
    db.sales()
        .get_with_items(sale_id)
        .await?
        .ok_or_else(|| PosError::not_found("Sale", sale_id))
}

// =============================================================================
// Unit Tests
// =============================================================================
