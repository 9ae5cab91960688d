use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::deliveries::deliveries_model::{decimal_from_db, decimal_to_db};
use crate::expenses::expenses_errors::ExpenseError;

/// Domain model representing one spend event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub expense_type: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for expenses
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct ExpenseDB {
    pub id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for the user->expense ownership edge
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_expenses)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserExpenseDB {
    pub id: String,
    pub user_id: String,
    pub expense_id: String,
    pub date_added: NaiveDateTime,
}

impl From<ExpenseDB> for Expense {
    fn from(db: ExpenseDB) -> Self {
        Expense {
            id: db.id,
            amount: decimal_from_db(db.amount),
            date: db.date,
            expense_type: db.expense_type,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

/// Input model for recording a new expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub id: Option<String>,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub expense_type: String,
    pub notes: Option<String>,
}

impl NewExpense {
    /// Validates the new expense data
    pub fn validate(&self) -> crate::expenses::Result<()> {
        if self.expense_type.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Expense type cannot be empty".to_string(),
            ));
        }
        if self.amount.is_sign_negative() {
            return Err(ExpenseError::InvalidData(
                "Amount cannot be negative".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn into_db(self, id: String, now: NaiveDateTime) -> ExpenseDB {
        ExpenseDB {
            id,
            amount: decimal_to_db(self.amount),
            date: self.date,
            expense_type: self.expense_type,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Input model for updating an existing expense
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub expense_type: String,
    pub notes: Option<String>,
}

impl ExpenseUpdate {
    pub fn validate(&self) -> crate::expenses::Result<()> {
        if self.id.trim().is_empty() {
            return Err(ExpenseError::InvalidData(
                "Expense ID is required for updates".to_string(),
            ));
        }
        NewExpense {
            id: Some(self.id.clone()),
            amount: self.amount,
            date: self.date,
            expense_type: self.expense_type.clone(),
            notes: self.notes.clone(),
        }
        .validate()
    }
}
