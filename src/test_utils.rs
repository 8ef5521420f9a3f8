//! Shared test utilities for the budget tracker.
//!
//! This module provides common helper functions for setting up test databases
//! and logged-in sessions with sensible defaults.

use crate::{
    cli::console::Console,
    core::session::SessionContext,
    db::users,
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;
use std::collections::VecDeque;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts a user directly through the record store.
///
/// The stored hash is a placeholder, so the user cannot log in through
/// `account::authenticate`; use `account::register` when a real password is
/// needed.
///
/// # Defaults
/// * `password_hash`: `"test-hash"`
/// * `email`: `"<username>@example.com"`
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<entities::user::Model> {
    users::create_user(
        db,
        username.to_string(),
        "test-hash".to_string(),
        Some(format!("{username}@example.com")),
    )
    .await
}

/// Creates a test user and returns a session logged in as them.
pub async fn login_test_user(db: &DatabaseConnection, username: &str) -> Result<SessionContext> {
    let user = create_test_user(db, username).await?;
    let mut session = SessionContext::new();
    session.login(user);
    Ok(session)
}

/// Sets up a complete test environment with one logged-in user.
/// Returns (db, session) for common ledger and report scenarios.
pub async fn setup_with_session(username: &str) -> Result<(DatabaseConnection, SessionContext)> {
    let db = setup_test_db().await?;
    let session = login_test_user(&db, username).await?;
    Ok((db, session))
}

/// A [`Console`] fed from a fixed list of input lines.
///
/// Passwords are taken from the same queue as ordinary input. Every prompt and
/// every written line is recorded for assertions. Running out of input behaves
/// like end of file.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    prompts: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    /// Creates a console that will answer prompts with `inputs` in order.
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Every prompt shown so far.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Every line written so far.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Whether any written line contains `text`.
    pub fn printed(&self, text: &str) -> bool {
        self.output.iter().any(|line| line.contains(text))
    }

    /// Number of written lines containing `text`.
    pub fn count_printed(&self, text: &str) -> usize {
        self.output.iter().filter(|line| line.contains(text)).count()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        self.prompts.push(prompt.to_string());
        Ok(self.inputs.pop_front())
    }

    fn read_password(&mut self, prompt: &str) -> Result<Option<String>> {
        self.read_line(prompt)
    }

    fn write_line(&mut self, line: &str) -> Result<()> {
        self.output.push(line.to_string());
        Ok(())
    }
}
