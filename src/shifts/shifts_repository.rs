use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::deliveries::DeliveryApp;
use crate::schema::{shifts, user_shifts};
use crate::shifts::shifts_errors::{Result, ShiftError};
use crate::shifts::shifts_model::*;
use crate::shifts::shifts_traits::ShiftRepositoryTrait;

/// Repository for shift rows and their ownership edges
pub struct ShiftRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl ShiftRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts a shift row and its ownership edge on the given connection
    pub fn insert_with_owner(
        conn: &mut SqliteConnection,
        user_id: &str,
        new_shift: NewShift,
    ) -> Result<Shift> {
        let now = chrono::Utc::now().naive_utc();
        new_shift.validate(now)?;

        let shift_db = ShiftDB {
            id: new_shift.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            app: new_shift.app.as_str().to_string(),
            start_time: new_shift.start_time,
            end_time: new_shift.end_time,
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(shifts::table)
            .values(&shift_db)
            .get_result::<ShiftDB>(conn)?;

        let edge = UserShiftDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            shift_id: inserted.id.clone(),
            date_added: now,
        };
        diesel::insert_into(user_shifts::table)
            .values(&edge)
            .execute(conn)?;

        Shift::try_from(inserted)
    }

    /// Updates a shift owned by the user on the given connection
    pub fn update_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        update: ShiftUpdate,
    ) -> Result<Shift> {
        let now = chrono::Utc::now().naive_utc();
        update.validate(now)?;

        let existing = Self::owned_db(conn, user_id, &update.id)?;

        let shift_db = ShiftDB {
            id: update.id.clone(),
            app: update.app.as_str().to_string(),
            start_time: update.start_time,
            end_time: update.end_time,
            created_at: existing.created_at,
            updated_at: now,
        };

        let updated = diesel::update(shifts::table.find(&update.id))
            .set(&shift_db)
            .get_result::<ShiftDB>(conn)?;

        Shift::try_from(updated)
    }

    /// Deletes a shift owned by the user; its ownership edge and linkage rows
    /// cascade with it.
    pub fn delete_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        shift_id: &str,
    ) -> Result<Shift> {
        let existing = Self::owned_db(conn, user_id, shift_id)?;

        diesel::delete(shifts::table.find(shift_id)).execute(conn)?;

        Shift::try_from(existing)
    }

    /// First shift owned by the user whose window covers `time` on `app`
    pub fn find_covering(
        conn: &mut SqliteConnection,
        user_id: &str,
        app: DeliveryApp,
        time: NaiveDateTime,
    ) -> Result<Option<Shift>> {
        shifts::table
            .inner_join(user_shifts::table.on(user_shifts::shift_id.eq(shifts::id)))
            .filter(user_shifts::user_id.eq(user_id))
            .filter(shifts::app.eq(app.as_str()))
            .filter(shifts::start_time.le(time))
            .filter(shifts::end_time.ge(time))
            .select(ShiftDB::as_select())
            .order(shifts::start_time.asc())
            .first::<ShiftDB>(conn)
            .optional()?
            .map(Shift::try_from)
            .transpose()
    }

    /// Loads a shift owned by the user on the given connection
    pub fn get_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        shift_id: &str,
    ) -> Result<Shift> {
        Self::owned_db(conn, user_id, shift_id).and_then(Shift::try_from)
    }

    fn owned_db(conn: &mut SqliteConnection, user_id: &str, shift_id: &str) -> Result<ShiftDB> {
        shifts::table
            .inner_join(user_shifts::table.on(user_shifts::shift_id.eq(shifts::id)))
            .filter(user_shifts::user_id.eq(user_id))
            .filter(shifts::id.eq(shift_id))
            .select(ShiftDB::as_select())
            .first::<ShiftDB>(conn)
            .map_err(ShiftError::from)
    }
}

impl ShiftRepositoryTrait for ShiftRepository {
    /// Retrieves all shifts owned by the user, most recent first
    fn get_by_owner(&self, user_id: &str) -> Result<Vec<Shift>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ShiftError::DatabaseError(e.to_string()))?;

        shifts::table
            .inner_join(user_shifts::table.on(user_shifts::shift_id.eq(shifts::id)))
            .filter(user_shifts::user_id.eq(user_id))
            .select(ShiftDB::as_select())
            .order(shifts::end_time.desc())
            .load::<ShiftDB>(&mut conn)?
            .into_iter()
            .map(Shift::try_from)
            .collect()
    }

    fn get_by_id(&self, user_id: &str, shift_id: &str) -> Result<Shift> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ShiftError::DatabaseError(e.to_string()))?;

        Self::owned_db(&mut conn, user_id, shift_id).and_then(Shift::try_from)
    }

    fn get_filtered(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> Result<Vec<Shift>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ShiftError::DatabaseError(e.to_string()))?;

        let mut query = shifts::table
            .inner_join(user_shifts::table.on(user_shifts::shift_id.eq(shifts::id)))
            .filter(user_shifts::user_id.eq(user_id))
            .into_boxed();

        if let Some(start) = start_time {
            query = query.filter(shifts::start_time.ge(start));
        }
        if let Some(end) = end_time {
            query = query.filter(shifts::end_time.le(end));
        }
        if let Some(app) = app {
            query = query.filter(shifts::app.eq(app.as_str()));
        }

        query
            .select(ShiftDB::as_select())
            .order(shifts::end_time.desc())
            .load::<ShiftDB>(&mut conn)?
            .into_iter()
            .map(Shift::try_from)
            .collect()
    }

    /// Distinct apps the user has worked shifts on
    fn get_apps(&self, user_id: &str) -> Result<Vec<DeliveryApp>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| ShiftError::DatabaseError(e.to_string()))?;

        shifts::table
            .inner_join(user_shifts::table.on(user_shifts::shift_id.eq(shifts::id)))
            .filter(user_shifts::user_id.eq(user_id))
            .select(shifts::app)
            .distinct()
            .load::<String>(&mut conn)?
            .into_iter()
            .map(|app| {
                app.parse()
                    .map_err(|e: crate::deliveries::DeliveryError| {
                        ShiftError::InvalidData(e.to_string())
                    })
            })
            .collect()
    }
}
