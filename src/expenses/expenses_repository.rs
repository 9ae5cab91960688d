use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::deliveries::deliveries_model::decimal_to_db;
use crate::expenses::expenses_errors::{ExpenseError, Result};
use crate::expenses::expenses_model::*;
use crate::expenses::expenses_traits::ExpenseRepositoryTrait;
use crate::schema::{expenses, user_expenses};

/// Repository for expense rows and their ownership edges
pub struct ExpenseRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ExpenseRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts an expense row and its ownership edge on the given connection
    pub fn insert_with_owner(
        conn: &mut SqliteConnection,
        user_id: &str,
        new_expense: NewExpense,
    ) -> Result<Expense> {
        new_expense.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let id = new_expense
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let expense_db = new_expense.into_db(id, now);

        let inserted = diesel::insert_into(expenses::table)
            .values(&expense_db)
            .get_result::<ExpenseDB>(conn)?;

        let edge = UserExpenseDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            expense_id: inserted.id.clone(),
            date_added: now,
        };
        diesel::insert_into(user_expenses::table)
            .values(&edge)
            .execute(conn)?;

        Ok(inserted.into())
    }

    /// Updates an expense owned by the user on the given connection
    pub fn update_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        update: ExpenseUpdate,
    ) -> Result<Expense> {
        update.validate()?;

        let existing = Self::owned_db(conn, user_id, &update.id)?;

        let expense_db = ExpenseDB {
            id: update.id.clone(),
            amount: decimal_to_db(update.amount),
            date: update.date,
            expense_type: update.expense_type,
            notes: update.notes,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let updated = diesel::update(expenses::table.find(&update.id))
            .set(&expense_db)
            .get_result::<ExpenseDB>(conn)?;

        Ok(updated.into())
    }

    /// Deletes an expense owned by the user
    pub fn delete_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        expense_id: &str,
    ) -> Result<Expense> {
        let existing = Self::owned_db(conn, user_id, expense_id)?;

        diesel::delete(expenses::table.find(expense_id)).execute(conn)?;

        Ok(existing.into())
    }

    fn owned_db(
        conn: &mut SqliteConnection,
        user_id: &str,
        expense_id: &str,
    ) -> Result<ExpenseDB> {
        expenses::table
            .inner_join(user_expenses::table.on(user_expenses::expense_id.eq(expenses::id)))
            .filter(user_expenses::user_id.eq(user_id))
            .filter(expenses::id.eq(expense_id))
            .select(ExpenseDB::as_select())
            .first::<ExpenseDB>(conn)
            .map_err(ExpenseError::from)
    }
}

impl ExpenseRepositoryTrait for ExpenseRepository {
    /// Retrieves all expenses owned by the user, newest first
    fn get_by_owner(&self, user_id: &str) -> Result<Vec<Expense>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        Ok(expenses::table
            .inner_join(user_expenses::table.on(user_expenses::expense_id.eq(expenses::id)))
            .filter(user_expenses::user_id.eq(user_id))
            .select(ExpenseDB::as_select())
            .order(expenses::date.desc())
            .load::<ExpenseDB>(&mut conn)?
            .into_iter()
            .map(Expense::from)
            .collect())
    }

    fn get_by_id(&self, user_id: &str, expense_id: &str) -> Result<Expense> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ExpenseError::DatabaseError(e.to_string()))?;

        Self::owned_db(&mut conn, user_id, expense_id).map(Expense::from)
    }
}
