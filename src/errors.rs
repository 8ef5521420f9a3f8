//! Unified error type for the budget tracker.
//!
//! Domain errors (bad credentials, unparsable input, missing records) are
//! recoverable: the menu prints them and keeps going. Store, I/O and hashing
//! failures are not, and end the process.

use thiserror::Error;

/// Every error the library can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// A user with this username is already registered
    #[error("Username '{username}' already exists. Please log in or choose a different username.")]
    DuplicateUsername {
        /// The username that was taken
        username: String,
    },

    /// No user matches the supplied username
    #[error("User '{username}' not found. Please register first.")]
    UserNotFound {
        /// The username that was looked up
        username: String,
    },

    /// The password does not verify against the stored hash
    #[error("Incorrect password. Please try again.")]
    InvalidCredentials,

    /// A ledger or report operation was attempted without a logged-in user
    #[error("Please login first.")]
    NotAuthenticated,

    /// Amount text could not be parsed as a number
    #[error("Invalid amount '{input}'. Please enter a number such as 1,250.50")]
    InvalidAmount {
        /// Raw user input
        input: String,
    },

    /// Date text is not a `YYYY-MM-DD` date
    #[error("Invalid date '{input}'. Please use the format YYYY-MM-DD")]
    InvalidDate {
        /// Raw user input
        input: String,
    },

    /// No transaction or budget with this id is visible to the caller
    #[error("{entity} not found (ID: {id})")]
    NotFound {
        /// Human-readable record kind ("Transaction", "Budget")
        entity: &'static str,
        /// The id that was requested
        id: i64,
    },

    /// A report was requested for somebody other than the session user
    #[error("You are not authorized to access the report for user ID {user_id}.")]
    Unauthorized {
        /// The user id that was requested
        user_id: i64,
    },

    /// Hashing or parsing a stored password hash failed
    #[error("Password hash error: {message}")]
    PasswordHash {
        /// Underlying error description
        message: String,
    },

    /// Settings could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Underlying error description
        message: String,
    },

    /// Store-level failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Console or filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the menu should print this error and keep running.
    ///
    /// Everything that stems from user input or session state is
    /// user-facing; store, I/O, hashing and configuration failures are fatal.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::DuplicateUsername { .. }
                | Self::UserNotFound { .. }
                | Self::InvalidCredentials
                | Self::NotAuthenticated
                | Self::InvalidAmount { .. }
                | Self::InvalidDate { .. }
                | Self::NotFound { .. }
                | Self::Unauthorized { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
