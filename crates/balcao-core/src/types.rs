//! # Domain Types
//!
//! Core domain types used throughout Balcão POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐              │
//! │  │    User      │  │   Product    │  │     Sale     │              │
//! │  │ ──────────── │  │ ──────────── │  │ ──────────── │              │
//! │  │ id (rowid)   │  │ id (rowid)   │  │ id (rowid)   │              │
//! │  │ username     │  │ name         │  │ customer     │              │
//! │  │ password_hash│  │ price_cents  │  │ totals       │              │
//! │  │ is_admin     │  │ quantity     │  │ payment      │              │
//! │  └──────────────┘  └──────────────┘  └──────┬───────┘              │
//! │                                             │ 1:N                  │
//! │                                      ┌──────┴───────┐              │
//! │                                      │   SaleItem   │              │
//! │                                      │  qty × price │              │
//! │                                      └──────────────┘              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entity identity is the SQLite rowid (`i64`), assigned on insert.
//! Monetary fields are raw centavos (`*_cents: i64`) so the structs map
//! directly onto database rows; use the `Money` helpers for arithmetic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Customer name recorded when the operator leaves the field blank.
pub const DEFAULT_CUSTOMER: &str = "Consumidor Final";

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    DebitCard,
    CreditCard,
    Pix,
    Transfer,
}

impl PaymentMethod {
    /// The label shown on screen and printed on receipts.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Dinheiro",
            PaymentMethod::DebitCard => "Cartão Débito",
            PaymentMethod::CreditCard => "Cartão Crédito",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Transfer => "Transferência",
        }
    }

    /// Parses either the receipt label or the storage identifier.
    /// Matching is case-insensitive.
    pub fn from_label(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "dinheiro" | "cash" => Some(PaymentMethod::Cash),
            "cartão débito" | "cartao debito" | "debit_card" => Some(PaymentMethod::DebitCard),
            "cartão crédito" | "cartao credito" | "credit_card" => Some(PaymentMethod::CreditCard),
            "pix" => Some(PaymentMethod::Pix),
            "transferência" | "transferencia" | "transfer" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// User
// =============================================================================

/// An operator account.
///
/// `password_hash` is an argon2 PHC string; the clear-text password never
/// leaves the login boundary.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Price in centavos.
    pub price_cents: i64,
    /// Current stock level. May go negative: the checkout decrement is
    /// unconditional (see `balcao-db::checkout`).
    pub quantity: i64,
    /// Restock alert threshold.
    pub min_quantity: i64,
    pub supplier: Option<String>,
    pub barcode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether the product shows up in the billing screen's picker.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A finalized sale. Created only by the checkout transaction and
/// immutable thereafter.
///
/// Invariants (enforced at checkout, asserted in tests):
/// - `subtotal_cents` = Σ item total_price_cents
/// - `total_cents` = max(0, subtotal_cents - discount_cents)
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub sale_date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_doc: String,
    pub subtotal_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment_method: PaymentMethod,
    pub user_id: i64,
}

impl Sale {
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
// Sale Item
// =============================================================================

/// A line item of a finalized sale.
///
/// Price and quantity are frozen at checkout time; later product edits do
/// not rewrite sale history.
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price in centavos at time of sale.
    pub unit_price_cents: i64,
    /// quantity × unit_price_cents, the line's value at time of sale.
    pub total_price_cents: i64,
}

impl SaleItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    #[inline]
    pub fn total_price(&self) -> Money {
        Money::from_cents(self.total_price_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
