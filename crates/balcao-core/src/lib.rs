//! # balcao-core: Pure Business Logic for Balcão POS
//!
//! This crate is the **heart** of Balcão POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Balcão POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  balcao-pos (Command Layer)                     │   │
//! │  │   login, add_to_cart, finalize_sale, receipt_for_sale, CRUD     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ balcao-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  receipt  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │ Document  │  │   │
//! │  │   │ Sale/User │  │ centavos  │  │ CartLine  │  │  PRÉVIA   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  balcao-db (Database Layer)                     │   │
//! │  │           SQLite queries, migrations, checkout, repos           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, Sale, SaleItem, PaymentMethod)
//! - [`money`] - Money type with integer centavo arithmetic (no floating point!)
//! - [`cart`] - The in-memory shopping cart and totals math
//! - [`receipt`] - Receipt projection from a live cart or a persisted sale
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use balcao_core::cart::Cart;
//! use balcao_core::money::Money;
//!
//! let mut cart = Cart::new();
//! cart.add(1, "Café 500g", Money::from_cents(1000), 10, 2).unwrap();
//! cart.add(2, "Açúcar 1kg", Money::from_cents(500), 5, 1).unwrap();
//!
//! // Subtotal R$ 25.00, discount R$ 3.00 → total R$ 22.00
//! assert_eq!(cart.subtotal().cents(), 2500);
//! assert_eq!(cart.total(Money::from_cents(300)).cents(), 2200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use balcao_core::Money` instead of
// `use balcao_core::money::Money`

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use receipt::{ReceiptDocument, ReceiptLine, ReceiptNumber};
pub use types::*;
