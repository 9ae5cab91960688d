use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::deliveries::DeliveryApp;
use crate::shifts::shifts_errors::ShiftError;

/// Domain model representing one work session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: String,
    pub app: DeliveryApp,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Shift {
    /// Whether a delivery at `time` on `app` belongs inside this shift.
    /// Window bounds are inclusive.
    pub fn covers(&self, app: DeliveryApp, time: NaiveDateTime) -> bool {
        self.app == app && time >= self.start_time && time <= self.end_time
    }
}

/// Database model for shifts
#[derive(Queryable, Selectable, Identifiable, Insertable, AsChangeset, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::shifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShiftDB {
    pub id: String,
    pub app: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Database model for the user->shift ownership edge
#[derive(Queryable, Selectable, Identifiable, Insertable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::user_shifts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserShiftDB {
    pub id: String,
    pub user_id: String,
    pub shift_id: String,
    pub date_added: NaiveDateTime,
}

impl TryFrom<ShiftDB> for Shift {
    type Error = ShiftError;

    fn try_from(db: ShiftDB) -> Result<Self, Self::Error> {
        Ok(Shift {
            app: db
                .app
                .parse()
                .map_err(|e: crate::deliveries::DeliveryError| {
                    ShiftError::InvalidData(e.to_string())
                })?,
            id: db.id,
            start_time: db.start_time,
            end_time: db.end_time,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Input model for recording a new shift
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewShift {
    pub id: Option<String>,
    pub app: DeliveryApp,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl NewShift {
    /// Validates the new shift data against `now`
    pub fn validate(&self, now: NaiveDateTime) -> crate::shifts::Result<()> {
        if self.start_time > now {
            return Err(ShiftError::InvalidData(
                "Shift start time cannot be in the future".to_string(),
            ));
        }
        if self.start_time >= self.end_time {
            return Err(ShiftError::InvalidData(
                "Shift end time must come after shift start time".to_string(),
            ));
        }
        Ok(())
    }
}

/// Input model for updating an existing shift
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ShiftUpdate {
    pub id: String,
    pub app: DeliveryApp,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl ShiftUpdate {
    pub fn validate(&self, now: NaiveDateTime) -> crate::shifts::Result<()> {
        if self.id.trim().is_empty() {
            return Err(ShiftError::InvalidData(
                "Shift ID is required for updates".to_string(),
            ));
        }
        NewShift {
            id: Some(self.id.clone()),
            app: self.app,
            start_time: self.start_time,
            end_time: self.end_time,
        }
        .validate(now)
    }
}
