//! # Application State
//!
//! The cart lives in memory, owned by the application state and passed
//! explicitly to commands. There is no module-level singleton; two `PosApp`
//! instances have two independent carts.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. Commands can run concurrently on the async runtime

use std::sync::{Arc, Mutex};

use balcao_core::cart::Cart;
use balcao_db::{Database, DbConfig, DbResult};

use crate::config::PosConfig;

// =============================================================================
// Cart State
// =============================================================================

/// Shared, mutex-guarded cart.
///
/// ## Why Not RwLock?
/// Cart operations are quick and most of them modify state. A RwLock would
/// add complexity with minimal benefit.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let subtotal = cart_state.with_cart(|cart| cart.subtotal());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        // A poisoned mutex means a panic mid-mutation; recover the cart
        // rather than cascading the panic into every later command.
        let cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.clear());
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut cart)
    }

    /// Clones the current cart contents, e.g. to hand to checkout.
    pub fn snapshot(&self) -> Cart {
        self.with_cart(|c| c.clone())
    }
}

// =============================================================================
// Application State
// =============================================================================

/// Everything a running POS instance owns: the database handle, the live
/// cart and the loaded configuration.
#[derive(Debug, Clone)]
pub struct PosApp {
    pub db: Database,
    pub cart: CartState,
    pub config: PosConfig,
}

impl PosApp {
    /// Opens the database (running migrations), bootstraps the default
    /// admin account and returns a ready application state.
    pub async fn start(config: PosConfig) -> DbResult<Self> {
        let db = Database::new(DbConfig::new(&config.database_path)).await?;
        db.users().ensure_default_admin().await?;

        Ok(PosApp {
            db,
            cart: CartState::new(),
            config,
        })
    }

    /// In-memory instance for tests.
    pub async fn start_in_memory() -> DbResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        db.users().ensure_default_admin().await?;

        Ok(PosApp {
            db,
            cart: CartState::new(),
            config: PosConfig::default(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
