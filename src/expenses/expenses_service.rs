use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::db::{DbPool, DbTransactionExecutor};
use crate::expenses::expenses_model::{Expense, ExpenseUpdate, NewExpense};
use crate::expenses::expenses_repository::ExpenseRepository;
use crate::expenses::expenses_traits::{ExpenseRepositoryTrait, ExpenseServiceTrait};
use crate::realtime::NotifierTrait;
use crate::statistics::StatsKind;
use crate::Result;

const AFFECTED_STATS: [StatsKind; 1] = [StatsKind::ExpenseStats];

/// Service wiring expense mutations to push updates
pub struct ExpenseService {
    pool: Arc<DbPool>,
    expense_repository: Arc<dyn ExpenseRepositoryTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl ExpenseService {
    pub fn new(
        pool: Arc<DbPool>,
        expense_repository: Arc<dyn ExpenseRepositoryTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        ExpenseService {
            pool,
            expense_repository,
            notifier,
        }
    }
}

#[async_trait]
impl ExpenseServiceTrait for ExpenseService {
    fn get_expenses(&self, user_id: &str) -> Result<Vec<Expense>> {
        Ok(self.expense_repository.get_by_owner(user_id)?)
    }

    fn get_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        Ok(self.expense_repository.get_by_id(user_id, expense_id)?)
    }

    async fn create_expense(&self, user_id: &str, expense: NewExpense) -> Result<Expense> {
        expense.validate()?;

        let created = self.pool.execute(|conn| -> Result<Expense> {
            Ok(ExpenseRepository::insert_with_owner(conn, user_id, expense)?)
        })?;

        debug!("Created expense {} for user {}", created.id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(created)
    }

    async fn update_expense(&self, user_id: &str, expense: ExpenseUpdate) -> Result<Expense> {
        expense.validate()?;
        // Surfaces NotFound before the transaction swallows it
        self.expense_repository.get_by_id(user_id, &expense.id)?;

        let updated = self.pool.execute(|conn| -> Result<Expense> {
            Ok(ExpenseRepository::update_owned(conn, user_id, expense)?)
        })?;

        debug!("Updated expense {} for user {}", updated.id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(updated)
    }

    async fn delete_expense(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        self.expense_repository.get_by_id(user_id, expense_id)?;

        let deleted = self.pool.execute(|conn| -> Result<Expense> {
            Ok(ExpenseRepository::delete_owned(conn, user_id, expense_id)?)
        })?;

        debug!("Deleted expense {} for user {}", expense_id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(deleted)
    }
}
