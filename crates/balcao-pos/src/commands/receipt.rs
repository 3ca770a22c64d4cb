//! # Receipt Commands
//!
//! Receipt preview, text rendering, PDF export and printing.
//!
//! Two entry points produce the same [`ReceiptDocument`] shape:
//!
//! ```text
//! receipt_preview(cart)  ──► number: PRÉVIA, date: now
//! receipt_for_sale(id)   ──► number: sale id, date: as persisted
//!        │
//!        └──► receipt_text / export_receipt_pdf / print_receipt
//! ```
//!
//! Rendering never branches on the source; a preview and the receipt of
//! the sale it became differ only in number and date.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use balcao_core::money::Money;
use balcao_core::receipt::{ReceiptDocument, ReceiptLine};
use balcao_core::types::PaymentMethod;
use balcao_core::CoreError;
use balcao_db::Database;
use balcao_receipt::layout;

use crate::error::PosError;
use crate::session::Session;
use crate::state::CartState;

/// Finalize-dialog fields relevant to a receipt preview.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub customer_name: String,
    pub customer_doc: String,
    /// Raw discount box text, parsed leniently like everywhere else.
    pub discount_input: String,
    pub payment_method: PaymentMethod,
}

/// Projects a receipt from the live cart, without persisting anything.
///
/// ## Errors
/// - `EMPTY_CART` - there is nothing to preview
pub fn receipt_preview(
    cart: &CartState,
    session: &Session,
    request: &PreviewRequest,
) -> Result<ReceiptDocument, PosError> {
    let snapshot = cart.snapshot();
    if snapshot.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let discount = Money::parse_lenient(&request.discount_input);

    Ok(ReceiptDocument::preview(
        &snapshot,
        &request.customer_name,
        &request.customer_doc,
        discount,
        request.payment_method,
        &session.user().full_name,
    ))
}

/// Projects a receipt from a persisted sale.
///
/// ## Errors
/// - `NOT_FOUND` - no such sale
pub async fn receipt_for_sale(db: &Database, sale_id: i64) -> Result<ReceiptDocument, PosError> {
    let details = db
        .sales()
        .get_with_items(sale_id)
        .await?
        .ok_or_else(|| PosError::not_found("Sale", sale_id))?;

    let items = details
        .items
        .into_iter()
        .map(|i| ReceiptLine {
            name: i.product_name,
            quantity: i.quantity,
            unit_price_cents: i.unit_price_cents,
            total_price_cents: i.total_price_cents,
        })
        .collect();

    Ok(ReceiptDocument::from_sale(
        &details.sale,
        items,
        &details.cashier,
    ))
}

/// Renders a receipt as the 40-column cupom text shown on screen.
pub fn receipt_text(doc: &ReceiptDocument) -> String {
    layout::lines(doc).join("\n")
}

/// Exports a persisted sale's receipt as a PDF at the chosen path.
///
/// ## Errors
/// - `NOT_FOUND` - no such sale
/// - `EXPORT_ERROR` - PDF generation or write failed
pub async fn export_receipt_pdf(
    db: &Database,
    sale_id: i64,
    path: &Path,
) -> Result<(), PosError> {
    let doc = receipt_for_sale(db, sale_id).await?;
    balcao_receipt::write_pdf(&doc, path)?;

    info!(sale_id, path = %path.display(), "Receipt exported");
    Ok(())
}

/// Spools a receipt to a temp PDF for the OS print dialog and returns
/// the spool path. Call [`finish_print`] once the dialog is closed.
pub fn print_receipt(doc: &ReceiptDocument) -> Result<PathBuf, PosError> {
    let path = balcao_receipt::spool(doc)?;
    info!(path = %path.display(), "Receipt sent to print spool");
    Ok(path)
}

/// Discards a print spool file after the print dialog is done.
pub fn finish_print(path: &Path) {
    balcao_receipt::discard(path);
}

// =============================================================================
// Unit Tests
// =============================================================================
