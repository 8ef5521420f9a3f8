//! Account business logic - registration and login.
//!
//! Registration checks for an existing username before inserting; the check
//! and the insert are separate statements, which is safe only while a single
//! session talks to the database. Login returns the user and leaves it to the
//! caller to install it in a [`SessionContext`](crate::core::session::SessionContext).

use crate::{
    core::password::{hash_password, verify_password},
    db::users,
    entities::user,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use tracing::{info, instrument, warn};

/// Registers a new user with a salted hash of `password`.
///
/// # Errors
/// - `Error::DuplicateUsername` if the username is taken
/// - `Error::PasswordHash` if hashing fails
/// - `Error::Database` on store failure
#[instrument(skip(db, password, email))]
pub async fn register(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    email: &str,
) -> Result<user::Model> {
    if users::get_user_by_username(db, username).await?.is_some() {
        warn!("Registration rejected, username already exists");
        return Err(Error::DuplicateUsername {
            username: username.to_string(),
        });
    }

    let password_hash = hash_password(password)?;
    let user = users::create_user(
        db,
        username.to_string(),
        password_hash,
        Some(email.to_string()),
    )
    .await?;

    info!(user_id = user.id, "Registered new user");
    Ok(user)
}

/// Verifies a username and password pair.
///
/// # Errors
/// - `Error::UserNotFound` if no user has this username
/// - `Error::InvalidCredentials` if the password does not match
/// - `Error::PasswordHash` if the stored hash is malformed
/// - `Error::Database` on store failure
#[instrument(skip(db, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> Result<user::Model> {
    let Some(user) = users::get_user_by_username(db, username).await? else {
        warn!("Login failed, unknown username");
        return Err(Error::UserNotFound {
            username: username.to_string(),
        });
    };

    if !verify_password(password, &user.password_hash)? {
        warn!(user_id = user.id, "Login failed, wrong password");
        return Err(Error::InvalidCredentials);
    }

    info!(user_id = user.id, "User authenticated");
    Ok(user)
}
