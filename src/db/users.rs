//! User accessors.

use crate::{
    entities::{User, user},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Fields of a user that may be changed after registration.
///
/// `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// New login name
    pub username: Option<String>,
    /// New password hash
    pub password_hash: Option<String>,
    /// New email; `Some(None)` clears it
    pub email: Option<Option<String>>,
}

/// Inserts a user row and returns it with its assigned id.
pub async fn create_user<C>(
    db: &C,
    username: String,
    password_hash: String,
    email: Option<String>,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let user = user::ActiveModel {
        username: Set(username),
        password_hash: Set(password_hash),
        email: Set(email),
        ..Default::default()
    };

    let result = user.insert(db).await?;
    debug!(user_id = result.id, "Inserted user");
    Ok(result)
}

/// Finds a user by primary key.
pub async fn get_user_by_id<C>(db: &C, user_id: i64) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds the first user with this exact username.
pub async fn get_user_by_username<C>(db: &C, username: &str) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .filter(user::Column::Username.eq(username))
        .order_by_asc(user::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every user in id order.
pub async fn list_all_users<C>(db: &C) -> Result<Vec<user::Model>>
where
    C: ConnectionTrait,
{
    User::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to an existing user and returns the updated row.
pub async fn update_user<C>(
    db: &C,
    existing: user::Model,
    changes: UserChanges,
) -> Result<user::Model>
where
    C: ConnectionTrait,
{
    let mut active_model: user::ActiveModel = existing.into();
    if let Some(username) = changes.username {
        active_model.username = Set(username);
    }
    if let Some(password_hash) = changes.password_hash {
        active_model.password_hash = Set(password_hash);
    }
    if let Some(email) = changes.email {
        active_model.email = Set(email);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a user by id. Returns whether a row was removed.
///
/// Owned transactions and budgets are not cascaded.
pub async fn delete_user<C>(db: &C, user_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = User::delete_by_id(user_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
