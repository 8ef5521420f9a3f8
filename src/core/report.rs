//! Report generation business logic.
//!
//! This module computes the available balance and assembles per-user reports.
//! The formatting helpers return plain strings so the menu layer only decides
//! where text goes, not what it says.

use crate::{
    core::session::SessionContext,
    db::{budgets, transactions},
    entities::{budget, transaction},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use std::fmt::Write as _;
use tracing::{debug, instrument};

/// Transaction type counted as money in
pub const INCOME: &str = "income";
/// Transaction type counted as money out
pub const EXPENSE: &str = "expense";

const SEPARATOR: &str = "------------------------";

/// Everything recorded for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserReport {
    /// The user the report covers
    pub user_id: i64,
    /// All of the user's transactions, in insertion order
    pub transactions: Vec<transaction::Model>,
    /// All of the user's budgets, in insertion order
    pub budgets: Vec<budget::Model>,
}

impl UserReport {
    /// True when the user has neither transactions nor budgets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.budgets.is_empty()
    }
}

/// Computes income minus expenses for the session user.
///
/// Transactions of any other type are ignored. A user with no transactions
/// has a balance of zero.
pub async fn calculate_balance(db: &DatabaseConnection, session: &SessionContext) -> Result<f64> {
    let user_id = session.user_id()?;

    let income = transactions::sum_amount_by_type(db, user_id, INCOME)
        .await?
        .unwrap_or(0.0);
    let expenses = transactions::sum_amount_by_type(db, user_id, EXPENSE)
        .await?
        .unwrap_or(0.0);

    debug!(user_id, income, expenses, "Calculated balance");
    Ok(income - expenses)
}

/// Builds the report for `target_user_id`, defaulting to the session user.
///
/// # Errors
/// Returns `Error::Unauthorized` when a target other than the session user is
/// requested; there is no administrative override.
#[instrument(skip(db, session))]
pub async fn generate_report(
    db: &DatabaseConnection,
    session: &SessionContext,
    target_user_id: Option<i64>,
) -> Result<UserReport> {
    let user_id = session.user_id()?;

    if let Some(target) = target_user_id.filter(|target| *target != user_id) {
        return Err(Error::Unauthorized { user_id: target });
    }

    let transactions = transactions::list_transactions_by_user(db, user_id, None).await?;
    let budgets = budgets::list_budgets_by_user(db, user_id, None).await?;

    Ok(UserReport {
        user_id,
        transactions,
        budgets,
    })
}

/// Formats the balance line shown in the menu header.
#[must_use]
pub fn format_balance(balance: f64) -> String {
    format!("Available Balance: {balance:.2}")
}

/// Multi-line block describing one transaction.
#[must_use]
pub fn format_transaction_details(transaction: &transaction::Model) -> String {
    format!(
        "ID: {}\nType: {}\nCategory: {}\nAmount: {:.2}\nDate: {}\n{SEPARATOR}",
        transaction.id,
        transaction.transaction_type,
        transaction.category,
        transaction.amount,
        transaction.date.format("%Y-%m-%d"),
    )
}

/// One-line summary used when picking a transaction to delete.
#[must_use]
pub fn format_transaction_line(transaction: &transaction::Model) -> String {
    format!(
        "Transaction ID: {} | Amount: {:.2} | Category: {}",
        transaction.id, transaction.amount, transaction.category
    )
}

/// One-line summary of a budget.
#[must_use]
pub fn format_budget_line(budget: &budget::Model) -> String {
    format!(
        "Budget ID: {} | Category: {} | Amount: {:.2}",
        budget.id, budget.category, budget.amount
    )
}

/// Renders a full report as printable text.
#[must_use]
pub fn format_report(report: &UserReport) -> String {
    let mut out = format!("Report for User ID: {}\n", report.user_id);

    if report.is_empty() {
        out.push_str("No transactions or budgets made.");
        return out;
    }

    if report.transactions.is_empty() {
        out.push_str("No transactions found.\n");
    } else {
        out.push_str("Transactions:\n");
        for transaction in &report.transactions {
            let _ = writeln!(out, "{}", format_transaction_details(transaction));
        }
    }

    if report.budgets.is_empty() {
        out.push_str("No budgets found.");
    } else {
        out.push_str("Budgets:");
        for budget in &report.budgets {
            let _ = write!(
                out,
                "\nID: {}\nCategory: {}\nAmount: {:.2}\n{SEPARATOR}",
                budget.id, budget.category, budget.amount
            );
        }
    }

    out
}
