//! Session state - which user, if any, is logged in.
//!
//! A [`SessionContext`] is owned by the menu controller and handed to every
//! ledger and report call by reference. It holds at most one user; logging
//! in again replaces the previous one.

use crate::{
    entities::user,
    errors::{Error, Result},
};

/// Single-slot record of the authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    user: Option<user::Model>,
}

impl SessionContext {
    /// Creates an unauthenticated session.
    #[must_use]
    pub const fn new() -> Self {
        Self { user: None }
    }

    /// Installs `user` as the authenticated user.
    pub fn login(&mut self, user: user::Model) {
        self.user = Some(user);
    }

    /// Clears the session, returning the user that was logged in.
    pub fn logout(&mut self) -> Option<user::Model> {
        self.user.take()
    }

    /// Whether a user is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The logged-in user.
    ///
    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is logged in.
    pub fn current_user(&self) -> Result<&user::Model> {
        self.user.as_ref().ok_or(Error::NotAuthenticated)
    }

    /// Id of the logged-in user.
    ///
    /// # Errors
    /// Returns `Error::NotAuthenticated` when nobody is logged in.
    pub fn user_id(&self) -> Result<i64> {
        self.current_user().map(|user| user.id)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn user(id: i64, username: &str) -> user::Model {
        user::Model {
            id,
            username: username.to_string(),
            password_hash: "hash".to_string(),
            email: None,
        }
    }

    #[test]
    fn test_new_session_is_unauthenticated() {
        let session = SessionContext::new();
        assert!(!session.is_authenticated());
        assert!(matches!(session.current_user(), Err(Error::NotAuthenticated)));
        assert!(matches!(session.user_id(), Err(Error::NotAuthenticated)));
    }

    #[test]
    fn test_login_then_logout() {
        let mut session = SessionContext::new();
        session.login(user(1, "alice"));

        assert!(session.is_authenticated());
        assert_eq!(session.user_id().unwrap(), 1);
        assert_eq!(session.current_user().unwrap().username, "alice");

        let logged_out = session.logout();
        assert_eq!(logged_out.map(|u| u.id), Some(1));
        assert!(!session.is_authenticated());
        assert!(session.logout().is_none());
    }

    #[test]
    fn test_login_replaces_previous_user() {
        let mut session = SessionContext::new();
        session.login(user(1, "alice"));
        session.login(user(2, "bob"));

        assert_eq!(session.user_id().unwrap(), 2);
    }
}
