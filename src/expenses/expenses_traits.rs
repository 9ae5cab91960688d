use async_trait::async_trait;

use crate::expenses::expenses_errors::Result;
use crate::expenses::expenses_model::{Expense, ExpenseUpdate, NewExpense};

/// Trait for expense read operations against committed state
pub trait ExpenseRepositoryTrait: Send + Sync {
    /// Get all expenses owned by a user
    fn get_by_owner(&self, user_id: &str) -> Result<Vec<Expense>>;

    /// Get one expense, scoped to its owner
    fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense>;
}

/// Trait for the expense mutation service
#[async_trait]
pub trait ExpenseServiceTrait: Send + Sync {
    fn get_expenses(&self, user_id: &str) -> crate::Result<Vec<Expense>>;

    fn get_expense(&self, user_id: &str, expense_id: &str) -> crate::Result<Expense>;

    /// Commit a new expense, then notify
    async fn create_expense(&self, user_id: &str, expense: NewExpense) -> crate::Result<Expense>;

    /// Commit an expense update, then notify
    async fn update_expense(&self, user_id: &str, expense: ExpenseUpdate)
        -> crate::Result<Expense>;

    /// Delete an expense, then notify
    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> crate::Result<Expense>;
}
