//! # balcao-db: Database Layer for Balcão POS
//!
//! This crate provides database access for the Balcão POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Balcão POS Data Flow                             │
//! │                                                                         │
//! │  POS Command (finalize_sale)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     balcao-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │   Checkout   │  │   │
//! │  │   │   (pool.rs)   │    │  user/product │    │ (checkout.rs)│  │   │
//! │  │   │               │    │  /sale        │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CRUD + login  │    │ one atomic   │  │   │
//! │  │   │ Migrations    │    │ queries       │    │ transaction  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │              ./balcao.db (WAL mode, FK enforced)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, product, sale)
//! - [`checkout`] - The atomic sale finalization transaction
//!
//! ## Usage
//!
//! ```rust,ignore
//! use balcao_db::{Database, DbConfig};
//!
//! // Create database with default config (runs migrations)
//! let config = DbConfig::new("path/to/balcao.db");
//! let db = Database::new(config).await?;
//!
//! // First run: make sure someone can log in
//! db.users().ensure_default_admin().await?;
//!
//! // Use repositories
//! let products = db.products().search("café", 20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::{CheckoutDetails, CheckoutError};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::{NewProduct, ProductRepository};
pub use repository::sale::{SaleDetails, SaleItemDetail, SaleRepository, SaleSummary};
pub use repository::user::{NewUser, UserRepository};
