//! # balcao-pos: Application Layer for Balcão POS
//!
//! The command layer a desktop shell binds to. Each screen action is one
//! function under [`commands`], taking its dependencies explicitly and
//! returning `Result<T, PosError>`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Balcão POS Crates                                 │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  balcao-pos (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   session ──► commands::{cart, sale, product, user, receipt}    │   │
//! │  │                  │                                              │   │
//! │  │   state::PosApp { db, cart, config }                            │   │
//! │  └──────────┬──────────────────┬───────────────────┬──────────────┘   │
//! │             ▼                  ▼                   ▼                   │
//! │      balcao-db           balcao-core         balcao-receipt            │
//! │      (sqlx/SQLite)       (pure logic)        (layout + lopdf)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Typical Flow
//! ```rust,ignore
//! let app = PosApp::start(PosConfig::load()?).await?;
//! let session = session::login(&app.db, "admin", "admin123").await?;
//!
//! commands::cart::add_to_cart(&app.db, &app.cart, product_id, 2).await?;
//! let sale = commands::sale::finalize_sale(&app.db, &app.cart, &session, request).await?;
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod state;

pub use config::PosConfig;
pub use error::{ErrorCode, PosError};
pub use session::{login, Session};
pub use state::{CartState, PosApp};
