//! # User Repository
//!
//! Database operations for operator accounts and login.
//!
//! ## Authentication Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Login Flow                                        │
//! │                                                                         │
//! │  Operator types username + password                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  authenticate(username, password)                                      │
//! │       │                                                                 │
//! │       ├── No such username ──────────────► Ok(None)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  argon2 verify against stored PHC hash                                 │
//! │       │                                                                 │
//! │       ├── Mismatch ──────────────────────► Ok(None)                    │
//! │       └── Match ─────────────────────────► Ok(Some(User))              │
//! │                                                                         │
//! │  Wrong username and wrong password are indistinguishable on screen.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Passwords are stored as argon2id PHC strings; the clear text is only
//! ever held transiently in these functions.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use balcao_core::types::User;

/// Username created on first run so the operator can log in at all.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// First-run admin password. Shown once in the seed/startup log; meant to
/// be changed immediately.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Input for creating a new operator account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    /// Clear-text password; hashed before it reaches the database.
    pub password: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Verifies a username/password pair.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - Credentials are valid
    /// * `Ok(None)` - Unknown username OR wrong password (deliberately
    ///   indistinguishable)
    pub async fn authenticate(&self, username: &str, password: &str) -> DbResult<Option<User>> {
        let user = self.get_by_username(username.trim()).await?;

        let Some(user) = user else {
            return Ok(None);
        };

        if verify_password(password, &user.password_hash) {
            debug!(username = %user.username, "Login accepted");
            Ok(Some(user))
        } else {
            debug!(username = %username, "Login rejected");
            Ok(None)
        }
    }

    /// Creates the default admin account if the users table is empty.
    ///
    /// ## Returns
    /// * `Ok(true)` - Admin was created (first run)
    /// * `Ok(false)` - Users already exist, nothing done
    pub async fn ensure_default_admin(&self) -> DbResult<bool> {
        if self.count().await? > 0 {
            return Ok(false);
        }

        self.create(&NewUser {
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password: DEFAULT_ADMIN_PASSWORD.to_string(),
            full_name: "Administrador".to_string(),
            email: None,
            is_admin: true,
        })
        .await?;

        info!(
            username = DEFAULT_ADMIN_USERNAME,
            "Default admin account created"
        );
        Ok(true)
    }

    /// Inserts a new operator account.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - Username already taken
    /// * `DbError::PasswordHash` - Hashing failed
    pub async fn create(&self, new_user: &NewUser) -> DbResult<User> {
        let password_hash = hash_password(&new_user.password)?;
        let now = Utc::now();
        let username = new_user.username.trim();

        debug!(username = %username, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash, full_name, email, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .bind(&new_user.full_name)
        .bind(&new_user.email)
        .bind(new_user.is_admin)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
            password_hash,
            full_name: new_user.full_name.clone(),
            email: new_user.email.clone(),
            is_admin: new_user.is_admin,
            created_at: now,
        })
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, full_name, email, is_admin, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by username.
    pub async fn get_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, full_name, email, is_admin, created_at
            FROM users
            WHERE username = ?1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Lists all operator accounts, ordered by username.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, full_name, email, is_admin, created_at
            FROM users
            ORDER BY username
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Updates an account's profile fields (not the password).
    ///
    /// ## Errors
    /// * `DbError::NotFound` - User doesn't exist
    pub async fn update_profile(
        &self,
        id: i64,
        full_name: &str,
        email: Option<&str>,
        is_admin: bool,
    ) -> DbResult<()> {
        debug!(id, "Updating user profile");

        let result = sqlx::query(
            r#"
            UPDATE users SET full_name = ?2, email = ?3, is_admin = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(is_admin)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Replaces an account's password.
    pub async fn change_password(&self, id: i64, new_password: &str) -> DbResult<()> {
        let password_hash = hash_password(new_password)?;

        let result = sqlx::query("UPDATE users SET password_hash = ?2 WHERE id = ?1")
            .bind(id)
            .bind(&password_hash)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Deletes an operator account.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - User doesn't exist
    /// * `DbError::ForeignKeyViolation` - User has sale history
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Counts operator accounts.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a clear-text password into an argon2id PHC string.
pub fn hash_password(password: &str) -> DbResult<String> {
    use argon2::{
        password_hash::{rand_core::OsRng, SaltString},
        Argon2, PasswordHasher,
    };

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| DbError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a clear-text password against a stored PHC hash.
///
/// A malformed stored hash verifies as false rather than erroring; the
/// operator just sees a failed login.
pub fn verify_password(password: &str, hash: &str) -> bool {
    use argon2::{Argon2, PasswordHash, PasswordVerifier};

    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("s3cret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_verify_malformed_hash_is_false() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }

    async fn test_repo() -> UserRepository {
        let db = crate::pool::Database::new(crate::pool::DbConfig::in_memory())
            .await
            .unwrap();
        db.users()
    }

    fn sample_user() -> NewUser {
        NewUser {
            username: "joana".to_string(),
            password: "senha123".to_string(),
            full_name: "Joana Alves".to_string(),
            email: Some("joana@example.com".to_string()),
            is_admin: false,
        }
    }

    #[tokio::test]
    async fn test_authenticate() {
        let repo = test_repo().await;
        repo.create(&sample_user()).await.unwrap();

        let user = repo.authenticate("joana", "senha123").await.unwrap();
        assert_eq!(user.unwrap().full_name, "Joana Alves");

        // Wrong password and unknown user both come back as None.
        assert!(repo.authenticate("joana", "errada").await.unwrap().is_none());
        assert!(repo.authenticate("ninguem", "senha123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ensure_default_admin_runs_once() {
        let repo = test_repo().await;

        assert!(repo.ensure_default_admin().await.unwrap());
        assert!(!repo.ensure_default_admin().await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);

        let admin = repo
            .authenticate(DEFAULT_ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD)
            .await
            .unwrap()
            .unwrap();
        assert!(admin.is_admin);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let repo = test_repo().await;
        repo.create(&sample_user()).await.unwrap();

        let err = repo.create(&sample_user()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_change_password() {
        let repo = test_repo().await;
        let user = repo.create(&sample_user()).await.unwrap();

        repo.change_password(user.id, "nova-senha").await.unwrap();

        assert!(repo.authenticate("joana", "senha123").await.unwrap().is_none());
        assert!(repo.authenticate("joana", "nova-senha").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_update_profile_not_found() {
        let repo = test_repo().await;
        let err = repo
            .update_profile(999, "Nome", None, false)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
