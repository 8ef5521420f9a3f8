//! Budget accessors.

use crate::{
    entities::{Budget, budget},
    errors::Result,
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Fields of a budget that may be changed in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetChanges {
    /// New category
    pub category: Option<String>,
    /// New amount
    pub amount: Option<f64>,
}

/// Inserts a budget row and returns it with its assigned id.
pub async fn create_budget<C>(
    db: &C,
    user_id: i64,
    category: String,
    amount: f64,
) -> Result<budget::Model>
where
    C: ConnectionTrait,
{
    let budget_model = budget::ActiveModel {
        category: Set(category),
        amount: Set(amount),
        user_id: Set(user_id),
        ..Default::default()
    };

    let result = budget_model.insert(db).await?;
    debug!(budget_id = result.id, user_id = result.user_id, "Inserted budget");
    Ok(result)
}

/// Finds a budget by primary key regardless of owner.
pub async fn get_budget_by_id<C>(db: &C, budget_id: i64) -> Result<Option<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find_by_id(budget_id).one(db).await.map_err(Into::into)
}

/// Finds a budget by primary key only if `user_id` owns it.
pub async fn get_budget_for_user<C>(
    db: &C,
    budget_id: i64,
    user_id: i64,
) -> Result<Option<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find_by_id(budget_id)
        .filter(budget::Column::UserId.eq(user_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the budget a user has set for one category.
pub async fn get_budget_for_user_and_category<C>(
    db: &C,
    user_id: i64,
    category: &str,
) -> Result<Option<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find()
        .filter(budget::Column::UserId.eq(user_id))
        .filter(budget::Column::Category.eq(category))
        .order_by_asc(budget::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Lists every budget in the store, in insertion order.
pub async fn list_all_budgets<C>(db: &C) -> Result<Vec<budget::Model>>
where
    C: ConnectionTrait,
{
    Budget::find()
        .order_by_asc(budget::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists the budgets owned by `user_id`, optionally narrowed to one category.
pub async fn list_budgets_by_user<C>(
    db: &C,
    user_id: i64,
    category: Option<&str>,
) -> Result<Vec<budget::Model>>
where
    C: ConnectionTrait,
{
    let mut query = Budget::find().filter(budget::Column::UserId.eq(user_id));
    if let Some(category) = category {
        query = query.filter(budget::Column::Category.eq(category));
    }

    query
        .order_by_asc(budget::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies `changes` to an existing budget and returns the updated row.
///
/// Fields left as `None` keep their stored value.
pub async fn update_budget<C>(
    db: &C,
    existing: budget::Model,
    changes: BudgetChanges,
) -> Result<budget::Model>
where
    C: ConnectionTrait,
{
    let mut active_model: budget::ActiveModel = existing.into();
    if let Some(category) = changes.category {
        active_model.category = Set(category);
    }
    if let Some(amount) = changes.amount {
        active_model.amount = Set(amount);
    }

    active_model.update(db).await.map_err(Into::into)
}

/// Deletes a budget by id. Returns whether a row was removed.
pub async fn delete_budget<C>(db: &C, budget_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Budget::delete_by_id(budget_id).exec(db).await?;
    Ok(result.rows_affected > 0)
}
