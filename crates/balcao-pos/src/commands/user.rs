//! # User Commands
//!
//! Operator account management. Everything here except `change_password`
//! for one's own account is admin-gated via [`Session::require_admin`].
//!
//! Responses use [`UserView`], which never carries the password hash.

use serde::Serialize;
use tracing::info;

use balcao_core::types::User;
use balcao_core::validation::{validate_full_name, validate_username};
use balcao_db::{Database, NewUser};

use crate::error::PosError;
use crate::session::Session;

/// Operator account as shown on the users screen. The stored password
/// hash stays inside balcao-db.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: Option<String>,
    pub is_admin: bool,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        UserView {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}

/// Creates a new operator account. Admin only.
///
/// ## Errors
/// - `UNAUTHORIZED` - caller is not an admin
/// - `VALIDATION_ERROR` - bad username/name, short password, or the
///   username is already taken
pub async fn create_user(
    db: &Database,
    session: &Session,
    username: String,
    password: String,
    full_name: String,
    email: Option<String>,
    is_admin: bool,
) -> Result<UserView, PosError> {
    session.require_admin()?;
    validate_username(&username)?;
    validate_full_name(&full_name)?;

    if password.len() < 6 {
        return Err(PosError::validation(
            "password must be at least 6 characters",
        ));
    }

    let user = db
        .users()
        .create(&NewUser {
            username,
            password,
            full_name,
            email,
            is_admin,
        })
        .await?;

    info!(username = %user.username, "Operator account created");
    Ok(user.into())
}

/// Lists all operator accounts. Admin only.
pub async fn list_users(db: &Database, session: &Session) -> Result<Vec<UserView>, PosError> {
    session.require_admin()?;

    let users = db.users().list().await?;
    Ok(users.into_iter().map(UserView::from).collect())
}

/// Updates an account's name, email and admin flag. Admin only.
///
/// An admin cannot drop their own admin flag; a counter with a single
/// admin account would otherwise lock itself out of this screen.
pub async fn update_user(
    db: &Database,
    session: &Session,
    user_id: i64,
    full_name: String,
    email: Option<String>,
    is_admin: bool,
) -> Result<(), PosError> {
    session.require_admin()?;
    validate_full_name(&full_name)?;

    if user_id == session.user_id() && !is_admin {
        return Err(PosError::validation(
            "cannot remove your own administrator flag",
        ));
    }

    db.users()
        .update_profile(user_id, &full_name, email.as_deref(), is_admin)
        .await?;

    info!(user_id, "Operator account updated");
    Ok(())
}

/// Changes an account's password.
///
/// Admins can reset anyone's; a regular operator can change only their own.
pub async fn change_password(
    db: &Database,
    session: &Session,
    user_id: i64,
    new_password: String,
) -> Result<(), PosError> {
    if user_id != session.user_id() {
        session.require_admin()?;
    }

    if new_password.len() < 6 {
        return Err(PosError::validation(
            "password must be at least 6 characters",
        ));
    }

    db.users().change_password(user_id, &new_password).await?;

    info!(user_id, "Password changed");
    Ok(())
}

/// Deletes an operator account. Admin only; self-deletion is refused.
///
/// Accounts with sale history are protected by the foreign key and the
/// resulting error is surfaced as a validation message.
pub async fn delete_user(db: &Database, session: &Session, user_id: i64) -> Result<(), PosError> {
    session.require_admin()?;

    if user_id == session.user_id() {
        return Err(PosError::validation("cannot delete your own account"));
    }

    db.users().delete(user_id).await?;

    info!(user_id, "Operator account deleted");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::session::login;
    use crate::state::PosApp;

    async fn admin_session(app: &PosApp) -> Session {
        login(&app.db, "admin", "admin123").await.unwrap()
    }

    async fn operator_session(app: &PosApp, admin: &Session) -> Session {
        create_user(
            &app.db,
            admin,
            "joana".to_string(),
            "senha123".to_string(),
            "Joana Alves".to_string(),
            None,
            false,
        )
        .await
        .unwrap();
        login(&app.db, "joana", "senha123").await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_list_users() {
        let app = PosApp::start_in_memory().await.unwrap();
        let admin = admin_session(&app).await;

        let created = create_user(
            &app.db,
            &admin,
            "joana".to_string(),
            "senha123".to_string(),
            "Joana Alves".to_string(),
            Some("joana@example.com".to_string()),
            false,
        )
        .await
        .unwrap();
        assert!(!created.is_admin);

        let users = list_users(&app.db, &admin).await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_non_admin_is_refused() {
        let app = PosApp::start_in_memory().await.unwrap();
        let admin = admin_session(&app).await;
        let operator = operator_session(&app, &admin).await;

        let err = list_users(&app.db, &operator).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err = create_user(
            &app.db,
            &operator,
            "outro".to_string(),
            "senha123".to_string(),
            "Outro Nome".to_string(),
            None,
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_short_password_is_rejected() {
        let app = PosApp::start_in_memory().await.unwrap();
        let admin = admin_session(&app).await;

        let err = create_user(
            &app.db,
            &admin,
            "joana".to_string(),
            "abc".to_string(),
            "Joana Alves".to_string(),
            None,
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_operator_changes_own_password_only() {
        let app = PosApp::start_in_memory().await.unwrap();
        let admin = admin_session(&app).await;
        let operator = operator_session(&app, &admin).await;

        change_password(&app.db, &operator, operator.user_id(), "nova-senha".to_string())
            .await
            .unwrap();
        assert!(login(&app.db, "joana", "nova-senha").await.is_ok());

        // Someone else's password needs admin.
        let err = change_password(&app.db, &operator, admin.user_id(), "hacked".to_string())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_or_delete_self() {
        let app = PosApp::start_in_memory().await.unwrap();
        let admin = admin_session(&app).await;

        let err = update_user(
            &app.db,
            &admin,
            admin.user_id(),
            "Administrador".to_string(),
            None,
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = delete_user(&app.db, &admin, admin.user_id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let app = PosApp::start_in_memory().await.unwrap();
        let admin = admin_session(&app).await;
        let operator = operator_session(&app, &admin).await;

        delete_user(&app.db, &admin, operator.user_id()).await.unwrap();
        assert_eq!(list_users(&app.db, &admin).await.unwrap().len(), 1);

        let err = delete_user(&app.db, &admin, operator.user_id()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
