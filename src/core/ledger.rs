//! Ledger business logic - transactions and budgets of the logged-in user.
//!
//! Every operation takes the caller's [`SessionContext`] and fails with
//! `Error::NotAuthenticated` before touching the store when nobody is logged
//! in. Reads and deletes are scoped to the session user; the one exception is
//! budget deletion under [`BudgetDeleteScope::AnyOwner`].

use crate::{
    core::session::SessionContext,
    db::{
        budgets::{self, BudgetChanges},
        transactions::{self, NewTransaction},
    },
    entities::{budget, transaction},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::{info, instrument};

/// Date format accepted for transaction dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which budgets `delete_budget` may remove.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetDeleteScope {
    /// Only budgets owned by the session user
    #[default]
    OwnerOnly,
    /// Any budget whose id matches, whoever owns it
    AnyOwner,
}

/// Whether `set_budget` inserted a new row or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetChange {
    /// No budget existed for the category
    Created,
    /// The existing budget's amount was replaced
    Updated,
}

/// Parses a user-typed amount, ignoring `,` thousands separators.
///
/// The sign is kept as typed.
///
/// # Errors
/// Returns `Error::InvalidAmount` if the text is not a finite number.
pub fn parse_amount(text: &str) -> Result<f64> {
    text.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::InvalidAmount {
            input: text.to_string(),
        })
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns `Error::InvalidDate` for any other format or an impossible date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate {
        input: text.to_string(),
    })
}

/// Records a transaction for the session user.
///
/// The amount is parsed before the date, so input that is wrong in both
/// places reports the amount.
#[instrument(skip(db, session))]
pub async fn add_transaction(
    db: &DatabaseConnection,
    session: &SessionContext,
    transaction_type: &str,
    category: &str,
    amount_text: &str,
    date_text: &str,
) -> Result<transaction::Model> {
    let user_id = session.user_id()?;
    let amount = parse_amount(amount_text)?;
    let date = parse_date(date_text)?;

    let created = transactions::create_transaction(
        db,
        NewTransaction {
            transaction_type: transaction_type.to_string(),
            category: category.to_string(),
            amount,
            date,
            user_id,
        },
    )
    .await?;

    info!(transaction_id = created.id, user_id, "Transaction added");
    Ok(created)
}

/// Lists the session user's transactions in insertion order.
pub async fn list_transactions(
    db: &DatabaseConnection,
    session: &SessionContext,
) -> Result<Vec<transaction::Model>> {
    let user_id = session.user_id()?;
    transactions::list_transactions_by_user(db, user_id, None).await
}

/// Deletes one of the session user's transactions.
///
/// # Errors
/// Returns `Error::NotFound` if no transaction with this id belongs to the
/// session user. Other users' transactions are reported the same way.
#[instrument(skip(db, session))]
pub async fn delete_transaction(
    db: &DatabaseConnection,
    session: &SessionContext,
    transaction_id: i64,
) -> Result<()> {
    let user_id = session.user_id()?;

    transactions::get_transaction_for_user(db, transaction_id, user_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "Transaction",
            id: transaction_id,
        })?;

    transactions::delete_transaction(db, transaction_id).await?;
    info!(transaction_id, user_id, "Transaction deleted");
    Ok(())
}

/// Sets the session user's budget for a category, updating it if one exists.
///
/// The lookup and the write run in one database transaction so a category
/// never ends up with two rows.
#[instrument(skip(db, session))]
pub async fn set_budget(
    db: &DatabaseConnection,
    session: &SessionContext,
    category: &str,
    amount_text: &str,
) -> Result<(budget::Model, BudgetChange)> {
    let user_id = session.user_id()?;
    let amount = parse_amount(amount_text)?;

    let txn = db.begin().await?;

    let existing = budgets::get_budget_for_user_and_category(&txn, user_id, category).await?;
    let result = match existing {
        Some(budget) => (
            budgets::update_budget(
                &txn,
                budget,
                BudgetChanges {
                    amount: Some(amount),
                    ..Default::default()
                },
            )
            .await?,
            BudgetChange::Updated,
        ),
        None => (
            budgets::create_budget(&txn, user_id, category.to_string(), amount).await?,
            BudgetChange::Created,
        ),
    };

    txn.commit().await?;

    info!(budget_id = result.0.id, user_id, change = ?result.1, "Budget saved");
    Ok(result)
}

/// Lists the session user's budgets in insertion order.
pub async fn list_budgets(
    db: &DatabaseConnection,
    session: &SessionContext,
) -> Result<Vec<budget::Model>> {
    let user_id = session.user_id()?;
    budgets::list_budgets_by_user(db, user_id, None).await
}

/// Deletes a budget by id.
///
/// With [`BudgetDeleteScope::AnyOwner`] the lookup ignores ownership, so any
/// logged-in user can delete any budget whose id they know.
///
/// # Errors
/// Returns `Error::NotFound` if no budget with this id is in scope.
#[instrument(skip(db, session))]
pub async fn delete_budget(
    db: &DatabaseConnection,
    session: &SessionContext,
    budget_id: i64,
    scope: BudgetDeleteScope,
) -> Result<()> {
    let user_id = session.user_id()?;

    let budget = match scope {
        BudgetDeleteScope::OwnerOnly => budgets::get_budget_for_user(db, budget_id, user_id).await?,
        BudgetDeleteScope::AnyOwner => budgets::get_budget_by_id(db, budget_id).await?,
    }
    .ok_or(Error::NotFound {
        entity: "Budget",
        id: budget_id,
    })?;

    budgets::delete_budget(db, budget.id).await?;
    info!(budget_id, user_id, owner_id = budget.user_id, "Budget deleted");
    Ok(())
}
