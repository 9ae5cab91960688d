use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::deliveries::deliveries_model::{Delivery, DeliveryApp, DeliveryDB};
use crate::linkage::linkage_errors::{LinkageError, Result};
use crate::linkage::linkage_model::ShiftDelivery;
use crate::linkage::linkage_traits::LinkageRepositoryTrait;
use crate::schema::{deliveries, shift_deliveries, user_deliveries};

/// Repository for the derived shift<->delivery linkage table
pub struct LinkageRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl LinkageRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts a linkage row unless the (shift, delivery) pair is already
    /// present. Returns the number of rows actually inserted.
    pub fn insert_link(
        conn: &mut SqliteConnection,
        user_id: &str,
        shift_id: &str,
        delivery_id: &str,
    ) -> Result<usize> {
        let row = ShiftDelivery {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            shift_id: shift_id.to_string(),
            delivery_id: delivery_id.to_string(),
        };

        diesel::insert_into(shift_deliveries::table)
            .values(&row)
            .on_conflict((shift_deliveries::shift_id, shift_deliveries::delivery_id))
            .do_nothing()
            .execute(conn)
            .map_err(LinkageError::from)
    }

    /// Delivery ids already linked to the shift
    pub fn linked_delivery_ids(
        conn: &mut SqliteConnection,
        user_id: &str,
        shift_id: &str,
    ) -> Result<Vec<String>> {
        shift_deliveries::table
            .filter(shift_deliveries::user_id.eq(user_id))
            .filter(shift_deliveries::shift_id.eq(shift_id))
            .select(shift_deliveries::delivery_id)
            .load::<String>(conn)
            .map_err(LinkageError::from)
    }

    /// Linkage rows for the shift together with the delivery fields the
    /// window/app predicate needs
    pub fn links_with_delivery_for_shift(
        conn: &mut SqliteConnection,
        user_id: &str,
        shift_id: &str,
    ) -> Result<Vec<(String, NaiveDateTime, String)>> {
        shift_deliveries::table
            .inner_join(deliveries::table.on(deliveries::id.eq(shift_deliveries::delivery_id)))
            .filter(shift_deliveries::user_id.eq(user_id))
            .filter(shift_deliveries::shift_id.eq(shift_id))
            .select((
                shift_deliveries::id,
                deliveries::delivery_time,
                deliveries::app,
            ))
            .load::<(String, NaiveDateTime, String)>(conn)
            .map_err(LinkageError::from)
    }

    /// Linkage rows claiming the delivery, with each shift id
    pub fn links_for_delivery(
        conn: &mut SqliteConnection,
        user_id: &str,
        delivery_id: &str,
    ) -> Result<Vec<(String, String)>> {
        shift_deliveries::table
            .filter(shift_deliveries::user_id.eq(user_id))
            .filter(shift_deliveries::delivery_id.eq(delivery_id))
            .select((shift_deliveries::id, shift_deliveries::shift_id))
            .load::<(String, String)>(conn)
            .map_err(LinkageError::from)
    }

    /// Deletes linkage rows by id
    pub fn delete_links(conn: &mut SqliteConnection, link_ids: &[String]) -> Result<usize> {
        if link_ids.is_empty() {
            return Ok(0);
        }
        diesel::delete(shift_deliveries::table.filter(shift_deliveries::id.eq_any(link_ids)))
            .execute(conn)
            .map_err(LinkageError::from)
    }

    /// Ids of deliveries owned by the user whose timestamp falls inside the
    /// window and whose app matches
    pub fn matching_delivery_ids(
        conn: &mut SqliteConnection,
        user_id: &str,
        app: DeliveryApp,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<String>> {
        deliveries::table
            .inner_join(user_deliveries::table.on(user_deliveries::delivery_id.eq(deliveries::id)))
            .filter(user_deliveries::user_id.eq(user_id))
            .filter(deliveries::app.eq(app.as_str()))
            .filter(deliveries::delivery_time.ge(start_time))
            .filter(deliveries::delivery_time.le(end_time))
            .select(deliveries::id)
            .load::<String>(conn)
            .map_err(LinkageError::from)
    }
}

impl LinkageRepositoryTrait for LinkageRepository {
    /// Linkage row count per shift; shifts with no rows are absent from the map
    fn counts_by_shift(&self, user_id: &str) -> Result<HashMap<String, i64>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LinkageError::DatabaseError(e.to_string()))?;

        let counts = shift_deliveries::table
            .filter(shift_deliveries::user_id.eq(user_id))
            .group_by(shift_deliveries::shift_id)
            .select((shift_deliveries::shift_id, diesel::dsl::count_star()))
            .load::<(String, i64)>(&mut conn)?;

        Ok(counts.into_iter().collect())
    }

    /// Deliveries linked to the shift, earliest first
    fn deliveries_for_shift(&self, user_id: &str, shift_id: &str) -> Result<Vec<Delivery>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LinkageError::DatabaseError(e.to_string()))?;

        shift_deliveries::table
            .inner_join(deliveries::table.on(deliveries::id.eq(shift_deliveries::delivery_id)))
            .filter(shift_deliveries::user_id.eq(user_id))
            .filter(shift_deliveries::shift_id.eq(shift_id))
            .select(DeliveryDB::as_select())
            .order(deliveries::delivery_time.asc())
            .load::<DeliveryDB>(&mut conn)?
            .into_iter()
            .map(|db| {
                Delivery::try_from(db).map_err(|e| LinkageError::InvalidData(e.to_string()))
            })
            .collect()
    }

    /// All linkage rows owned by the user
    fn rows_for_owner(&self, user_id: &str) -> Result<Vec<ShiftDelivery>> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LinkageError::DatabaseError(e.to_string()))?;

        shift_deliveries::table
            .filter(shift_deliveries::user_id.eq(user_id))
            .select(ShiftDelivery::as_select())
            .load::<ShiftDelivery>(&mut conn)
            .map_err(LinkageError::from)
    }
}
