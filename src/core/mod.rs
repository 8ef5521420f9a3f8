//! Core business logic - framework-agnostic account, ledger and report
//! operations. Nothing here reads from or writes to the terminal.

/// Registration and login
pub mod account;
/// Transactions and budgets of the logged-in user
pub mod ledger;
/// Argon2 password hashing
pub mod password;
/// Balance and report generation
pub mod report;
/// The authenticated-user slot
pub mod session;
