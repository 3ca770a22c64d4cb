//! # Login Session
//!
//! Every command past the login screen runs under a `Session`. The session
//! is just the authenticated user; admin-only commands call
//! [`Session::require_admin`] before touching anything.
//!
//! ```text
//! login(db, "admin", "admin123") ──► Session { user }
//!        │
//!        └── wrong credentials ────► PosError::Unauthorized
//! ```

use tracing::info;

use balcao_core::types::User;
use balcao_db::Database;

use crate::error::PosError;

/// An authenticated operator session.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    /// The logged-in operator.
    pub fn user(&self) -> &User {
        &self.user
    }

    /// The operator's id, as recorded on finalized sales.
    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    /// Errors unless the operator has the admin flag.
    ///
    /// User management screens call this first; the error message does not
    /// leak which specific operation was refused.
    pub fn require_admin(&self) -> Result<(), PosError> {
        if self.user.is_admin {
            Ok(())
        } else {
            Err(PosError::unauthorized("Administrator privileges required"))
        }
    }

    #[cfg(test)]
    pub(crate) fn for_user(user: User) -> Self {
        Session { user }
    }
}

/// Verifies credentials and opens a session.
///
/// Unknown username and wrong password produce the same error, so the
/// login screen cannot be used to probe for accounts.
pub async fn login(db: &Database, username: &str, password: &str) -> Result<Session, PosError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(PosError::validation("username and password are required"));
    }

    let user = db.users().authenticate(username, password).await?;

    match user {
        Some(user) => {
            info!(username = %user.username, "Operator logged in");
            Ok(Session { user })
        }
        None => Err(PosError::unauthorized("Invalid username or password")),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
