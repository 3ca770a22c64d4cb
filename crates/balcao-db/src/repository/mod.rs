//! # Repository Module
//!
//! Repository implementations for database operations.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Pattern                                  │
//! │                                                                         │
//! │  Command layer                 Repositories              Database      │
//! │  ─────────────                 ────────────              ────────      │
//! │  login ──────────────────────► UserRepository ─────────► users         │
//! │  product CRUD ───────────────► ProductRepository ──────► products      │
//! │  sale history / receipts ────► SaleRepository ─────────► sales,        │
//! │                                                          sale_items    │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • SQL isolated from business logic                                    │
//! │  • Commands depend on methods, not queries                             │
//! │  • Each repository is cheap to construct (clones the pool handle)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The checkout transaction spans all three tables and therefore lives in
//! its own module, [`crate::checkout`], not in a repository.

pub mod product;
pub mod sale;
pub mod user;
