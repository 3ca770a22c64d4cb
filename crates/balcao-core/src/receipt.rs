//! # Receipt Projection
//!
//! The `ReceiptDocument` is the single shape consumed by preview, print
//! and PDF export. It can be projected from two sources:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Projection                              │
//! │                                                                     │
//! │  Persisted Sale ──┐                                                 │
//! │  (header+items)   ├──► ReceiptDocument ──► preview / print / PDF    │
//! │  Live Cart ───────┘         ▲                                       │
//! │                             │                                       │
//! │          number: Sale(id) or Preview ("PRÉVIA")                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Downstream rendering never needs to know which source produced the
//! document; only the number and the date differ between the two modes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{PaymentMethod, Sale, DEFAULT_CUSTOMER};

// =============================================================================
// Receipt Number
// =============================================================================

/// The receipt's identifying number.
///
/// A preview built from a live cart has no sale id yet; it carries a
/// non-numeric marker so it can never be mistaken for a persisted sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptNumber {
    /// A persisted sale's database id.
    Sale(i64),
    /// An unsaved preview of the current cart.
    Preview,
}

impl ReceiptNumber {
    pub fn is_preview(&self) -> bool {
        matches!(self, ReceiptNumber::Preview)
    }
}

impl fmt::Display for ReceiptNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptNumber::Sale(id) => write!(f, "{}", id),
            ReceiptNumber::Preview => f.write_str("PRÉVIA"),
        }
    }
}

// =============================================================================
// Receipt Document
// =============================================================================

/// One printable line of a receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub total_price_cents: i64,
}

/// The normalized receipt structure. Transient: regenerated on demand,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptDocument {
    pub number: ReceiptNumber,
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_doc: String,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    /// Full name of the operator who rang the sale up.
    pub cashier: String,
    pub items: Vec<ReceiptLine>,
}

impl ReceiptDocument {
    /// Projects a receipt from a live cart, without touching persistence.
    ///
    /// The date is the current timestamp and the number is the preview
    /// marker. A blank customer name falls back to the walk-in sentinel.
    pub fn preview(
        cart: &Cart,
        customer_name: &str,
        customer_doc: &str,
        discount: Money,
        payment_method: PaymentMethod,
        cashier: &str,
    ) -> Self {
        let customer_name = customer_name.trim();
        ReceiptDocument {
            number: ReceiptNumber::Preview,
            date: Utc::now(),
            customer_name: if customer_name.is_empty() {
                DEFAULT_CUSTOMER.to_string()
            } else {
                customer_name.to_string()
            },
            customer_doc: customer_doc.trim().to_string(),
            subtotal_cents: cart.subtotal().cents(),
            discount_cents: discount.cents(),
            total_cents: cart.total(discount).cents(),
            payment_method,
            cashier: cashier.to_string(),
            items: cart
                .lines()
                .iter()
                .map(|l| ReceiptLine {
                    name: l.name.clone(),
                    quantity: l.quantity,
                    unit_price_cents: l.unit_price.cents(),
                    total_price_cents: l.line_total().cents(),
                })
                .collect(),
        }
    }

    /// Assembles a receipt from a persisted sale header, its item lines
    /// (already joined with product names) and the cashier's name.
    ///
    /// Pure assembly; the lookup itself lives in the persistence layer.
    pub fn from_sale(sale: &Sale, items: Vec<ReceiptLine>, cashier: &str) -> Self {
        ReceiptDocument {
            number: ReceiptNumber::Sale(sale.id),
            date: sale.sale_date,
            customer_name: sale.customer_name.clone(),
            customer_doc: sale.customer_doc.clone(),
            subtotal_cents: sale.subtotal_cents,
            discount_cents: sale.discount_cents,
            total_cents: sale.total_cents,
            payment_method: sale.payment_method,
            cashier: cashier.to_string(),
            items,
        }
    }

    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
