//! Database configuration module.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs without hand-written SQL. Creation is idempotent: every statement is
//! emitted as `CREATE TABLE IF NOT EXISTS`.

use crate::entities::{Budget, Transaction, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use tracing::{debug, info, instrument};

/// Database used when neither the settings file nor `DATABASE_URL` name one.
///
/// `mode=rwc` lets `SQLite` create the file on first run.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://budget_tracker.db?mode=rwc";

/// Opens a connection pool to the given database URL.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates the `users`, `transactions` and `budgets` tables if they are absent.
///
/// `users` goes first because the other two reference it by foreign key.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    create_table_for(db, User).await?;
    create_table_for(db, Transaction).await?;
    create_table_for(db, Budget).await?;

    info!("Database tables ensured");
    Ok(())
}

async fn create_table_for<E>(db: &DatabaseConnection, entity: E) -> Result<()>
where
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statement = schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned();

    db.execute(builder.build(&statement)).await?;
    Ok(())
}
