//! Record store - per-entity CRUD accessors over the `SeaORM` entities.
//!
//! Every accessor runs a single statement against whatever connection it is
//! handed and returns store errors unchanged inside [`crate::errors::Error`].
//! Nothing here knows about sessions; ownership scoping is expressed through
//! the `user_id` arguments and enforced by the services in [`crate::core`].

/// Budget rows
pub mod budgets;
/// Transaction rows and aggregates
pub mod transactions;
/// User rows
pub mod users;
