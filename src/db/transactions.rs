//! Transaction accessors and aggregates.

use crate::{
    entities::{Transaction, transaction},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*, sea_query::Expr};
use tracing::debug;

/// Column values for a new transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Kind of entry, normally `"income"` or `"expense"`
    pub transaction_type: String,
    /// Free-text category
    pub category: String,
    /// Amount as parsed from input
    pub amount: f64,
    /// Calendar date
    pub date: Date,
    /// Owner
    pub user_id: i64,
}

/// Fields of a transaction that may be changed in place.
///
/// No menu path edits transactions; this exists for completeness of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionChanges {
    /// New type
    pub transaction_type: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New amount
    pub amount: Option<f64>,
    /// New date
    pub date: Option<Date>,
}

/// Inserts a transaction row and returns it with its assigned id.
pub async fn create_transaction<C>(db: &C, new: NewTransaction) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let transaction_model = transaction::ActiveModel {
        transaction_type: Set(new.transaction_type),
        category: Set(new.category),
        amount: Set(new.amount),
        date: Set(new.date),
        user_id: Set(new.user_id),
        ..Default::default()
    };

    let result = transaction_model.insert(db).await?;
    debug!(
        transaction_id = result.id,
        user_id = result.user_id,
        "Inserted transaction"
    );
    Ok(result)
}

/// Finds a transaction by primary key regardless of owner.
pub async fn get_transaction_by_id<C>(
    db: &C,
    transaction_id: i64,
) -> Result<Option<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a transaction by primary key only if `user_id` owns it.
pub async fn get_transaction_for_user<C>(
    db: &C,
    transaction_id: i64,
    user_id: i64,
) -> Result<Option<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find_by_id(transaction_id)
        .filter(transaction::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every transaction in the store, in insertion order.
pub async fn list_all_transactions<C>(db: &C) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find()
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the transactions owned by `user_id`, optionally narrowed to one category.
pub async fn list_transactions_by_user<C>(
    db: &C,
    user_id: i64,
    category: Option<&str>,
) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Transaction::find().filter(transaction::Column::UserId.eq(user_id));
    if let Some(category) = category {
        query = query.filter(transaction::Column::Category.eq(category));
    }

    query
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists transactions in one category across all users.
pub async fn list_transactions_by_category<C>(
    db: &C,
    category: &str,
) -> Result<Vec<transaction::Model>>
where
    C: ConnectionTrait,
{
    Transaction::find()
        .filter(transaction::Column::Category.eq(category))
        .order_by_asc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the amounts of one user's transactions of the given type.
///
/// Returns `None` when the user has no transactions of that type, mirroring
/// SQL `SUM` over an empty set.
pub async fn sum_amount_by_type<C>(
    db: &C,
    user_id: i64,
    transaction_type: &str,
) -> Result<Option<f64>>
where
    C: ConnectionTrait,
{
    let total: Option<Option<f64>> = Transaction::find()
        .select_only()
        .column_as(Expr::col(transaction::Column::Amount).sum(), "total")
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::TransactionType.eq(transaction_type))
        .into_tuple()
        .one(db)
        .await?;

    Ok(total.flatten())
}

/// Applies `changes` to an existing transaction and returns the updated row.
pub async fn update_transaction<C>(
    db: &C,
    existing: transaction::Model,
    changes: TransactionChanges,
) -> Result<transaction::Model>
where
    C: ConnectionTrait,
{
    let mut active_model: transaction::ActiveModel = existing.into();
    if let Some(transaction_type) = changes.transaction_type {
        active_model.transaction_type = Set(transaction_type);
    }
    if let Some(category) = changes.category {
        active_model.category = Set(category);
    }
    if let Some(amount) = changes.amount {
        active_model.amount = Set(amount);
    }
    if let Some(date) = changes.date {
        active_model.date = Set(date);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a transaction by id. Returns whether a row was removed.
pub async fn delete_transaction<C>(db: &C, transaction_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Transaction::delete_by_id(transaction_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::NaiveDate;

    async fn insert(
        db: &DatabaseConnection,
        user_id: i64,
        transaction_type: &str,
        category: &str,
        amount: f64,
    ) -> Result<transaction::Model> {
        let new = NewTransaction {
            transaction_type: transaction_type.to_string(),
            category: category.to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            user_id,
        };
        create_transaction(db, new).await
    }

    #[tokio::test]
    async fn test_create_and_get_transaction() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "alice").await?;

        let created = insert(&db, user.id, "income", "salary", 1000.0).await?;
        assert_eq!(created.user_id, user.id);
        assert_eq!(created.amount, 1000.0);

        let found = get_transaction_by_id(&db, created.id).await?;
        assert_eq!(found, Some(created));
        assert!(get_transaction_by_id(&db, 999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_transaction_for_user_checks_owner() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;

        let created = insert(&db, alice.id, "expense", "food", 12.0).await?;

        let as_owner = get_transaction_for_user(&db, created.id, alice.id).await?;
        assert!(as_owner.is_some());
        let as_other = get_transaction_for_user(&db, created.id, bob.id).await?;
        assert!(as_other.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_list_by_user_and_category() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let bob = create_test_user(&db, "bob").await?;

        let food = insert(&db, alice.id, "expense", "food", 12.0).await?;
        let rent = insert(&db, alice.id, "expense", "rent", 800.0).await?;
        let bob_food = insert(&db, bob.id, "expense", "food", 9.0).await?;

        let alice_all = list_transactions_by_user(&db, alice.id, None).await?;
        assert_eq!(alice_all, vec![food.clone(), rent]);

        let alice_food = list_transactions_by_user(&db, alice.id, Some("food")).await?;
        assert_eq!(alice_food, vec![food.clone()]);

        let all_food = list_transactions_by_category(&db, "food").await?;
        assert_eq!(all_food, vec![food, bob_food]);

        assert_eq!(list_all_transactions(&db).await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_sum_amount_by_type() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;

        assert_eq!(sum_amount_by_type(&db, alice.id, "income").await?, None);

        insert(&db, alice.id, "income", "salary", 100.0).await?;
        insert(&db, alice.id, "income", "gift", 20.5).await?;
        insert(&db, alice.id, "expense", "food", 30.0).await?;

        let income = sum_amount_by_type(&db, alice.id, "income").await?;
        assert_eq!(income, Some(120.5));
        let expense = sum_amount_by_type(&db, alice.id, "expense").await?;
        assert_eq!(expense, Some(30.0));
        assert_eq!(sum_amount_by_type(&db, alice.id, "refund").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_transaction() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "alice").await?;
        let created = insert(&db, alice.id, "expense", "food", 12.0).await?;

        let updated = update_transaction(
            &db,
            created,
            TransactionChanges {
                amount: Some(15.0),
                category: Some("groceries".to_string()),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.amount, 15.0);
        assert_eq!(updated.category, "groceries");
        assert_eq!(updated.transaction_type, "expense");

        assert!(delete_transaction(&db, updated.id).await?);
        assert!(!delete_transaction(&db, updated.id).await?);
        assert!(get_transaction_by_id(&db, updated.id).await?.is_none());
        Ok(())
    }
}
