//! Transaction entity - A dated income or expense entry.
//!
//! `transaction_type` is expected to be `"income"` or `"expense"` but any string
//! is stored as given. Amounts keep whatever sign the user typed.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Kind of entry, normally `"income"` or `"expense"`
    pub transaction_type: String,
    /// Free-text category (e.g., "salary", "groceries")
    pub category: String,
    /// Amount as entered
    pub amount: f64,
    /// Calendar date of the transaction
    pub date: Date,
    /// Owner of the transaction
    pub user_id: i64,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
