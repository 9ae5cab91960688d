use chrono::NaiveDateTime;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::get_connection;
use crate::deliveries::deliveries_errors::{DeliveryError, Result};
use crate::deliveries::deliveries_model::*;
use crate::deliveries::deliveries_traits::DeliveryRepositoryTrait;
use crate::schema::{deliveries, shift_deliveries, user_deliveries};

/// Repository for delivery rows and their ownership edges
pub struct DeliveryRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl DeliveryRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }

    /// Inserts a delivery row and its ownership edge on the given connection.
    /// `total_pay` is derived here so the `total = base + tip` invariant holds
    /// for everything aggregation ever reads.
    pub fn insert_with_owner(
        conn: &mut SqliteConnection,
        user_id: &str,
        new_delivery: NewDelivery,
    ) -> Result<Delivery> {
        new_delivery.validate()?;

        let now = chrono::Utc::now().naive_utc();
        let delivery_db = DeliveryDB {
            id: new_delivery
                .id
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            app: new_delivery.app.as_str().to_string(),
            delivery_time: new_delivery.delivery_time,
            base_pay: decimal_to_db(new_delivery.base_pay),
            tip_pay: decimal_to_db(new_delivery.tip_pay),
            total_pay: decimal_to_db(new_delivery.base_pay + new_delivery.tip_pay),
            mileage: decimal_to_db(new_delivery.mileage),
            restaurant: new_delivery.restaurant,
            customer_neighborhood: new_delivery.customer_neighborhood,
            notes: new_delivery.notes,
            created_at: now,
            updated_at: now,
        };

        let inserted = diesel::insert_into(deliveries::table)
            .values(&delivery_db)
            .get_result::<DeliveryDB>(conn)?;

        let edge = UserDeliveryDB {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            delivery_id: inserted.id.clone(),
            date_added: now,
        };
        diesel::insert_into(user_deliveries::table)
            .values(&edge)
            .execute(conn)?;

        Delivery::try_from(inserted)
    }

    /// Updates a delivery owned by the user on the given connection
    pub fn update_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        update: DeliveryUpdate,
    ) -> Result<Delivery> {
        update.validate()?;

        let existing = Self::owned_db(conn, user_id, &update.id)?;

        let delivery_db = DeliveryDB {
            id: update.id.clone(),
            app: update.app.as_str().to_string(),
            delivery_time: update.delivery_time,
            base_pay: decimal_to_db(update.base_pay),
            tip_pay: decimal_to_db(update.tip_pay),
            total_pay: decimal_to_db(update.base_pay + update.tip_pay),
            mileage: decimal_to_db(update.mileage),
            restaurant: update.restaurant,
            customer_neighborhood: update.customer_neighborhood,
            notes: update.notes,
            created_at: existing.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
        };

        let updated = diesel::update(deliveries::table.find(&update.id))
            .set(&delivery_db)
            .get_result::<DeliveryDB>(conn)?;

        Delivery::try_from(updated)
    }

    /// Deletes a delivery owned by the user; the ownership edge and any
    /// linkage rows go with it via FK cascade.
    pub fn delete_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        delivery_id: &str,
    ) -> Result<Delivery> {
        let existing = Self::owned_db(conn, user_id, delivery_id)?;

        diesel::delete(deliveries::table.find(delivery_id)).execute(conn)?;

        Delivery::try_from(existing)
    }

    /// Loads a delivery owned by the user on the given connection
    pub fn get_owned(
        conn: &mut SqliteConnection,
        user_id: &str,
        delivery_id: &str,
    ) -> Result<Delivery> {
        Self::owned_db(conn, user_id, delivery_id).and_then(Delivery::try_from)
    }

    fn owned_db(
        conn: &mut SqliteConnection,
        user_id: &str,
        delivery_id: &str,
    ) -> Result<DeliveryDB> {
        deliveries::table
            .inner_join(user_deliveries::table.on(user_deliveries::delivery_id.eq(deliveries::id)))
            .filter(user_deliveries::user_id.eq(user_id))
            .filter(deliveries::id.eq(delivery_id))
            .select(DeliveryDB::as_select())
            .first::<DeliveryDB>(conn)
            .map_err(DeliveryError::from)
    }
}

impl DeliveryRepositoryTrait for DeliveryRepository {
    /// Retrieves all deliveries owned by the user, newest first
    fn get_by_owner(&self, user_id: &str) -> Result<Vec<Delivery>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        deliveries::table
            .inner_join(user_deliveries::table.on(user_deliveries::delivery_id.eq(deliveries::id)))
            .filter(user_deliveries::user_id.eq(user_id))
            .select(DeliveryDB::as_select())
            .order(deliveries::delivery_time.desc())
            .load::<DeliveryDB>(&mut conn)?
            .into_iter()
            .map(Delivery::try_from)
            .collect()
    }

    fn get_by_id(&self, user_id: &str, delivery_id: &str) -> Result<Delivery> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        Self::owned_db(&mut conn, user_id, delivery_id).and_then(Delivery::try_from)
    }

    fn get_filtered(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> Result<Vec<Delivery>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        let mut query = deliveries::table
            .inner_join(user_deliveries::table.on(user_deliveries::delivery_id.eq(deliveries::id)))
            .filter(user_deliveries::user_id.eq(user_id))
            .into_boxed();

        if let Some(start) = start_time {
            query = query.filter(deliveries::delivery_time.ge(start));
        }
        if let Some(end) = end_time {
            query = query.filter(deliveries::delivery_time.le(end));
        }
        if let Some(app) = app {
            query = query.filter(deliveries::app.eq(app.as_str()));
        }

        query
            .select(DeliveryDB::as_select())
            .order(deliveries::delivery_time.desc())
            .load::<DeliveryDB>(&mut conn)?
            .into_iter()
            .map(Delivery::try_from)
            .collect()
    }

    /// Deliveries in the window that no shift has claimed yet
    fn get_unlinked_in_window(
        &self,
        user_id: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<Delivery>> {
        let mut conn = get_connection(&self.pool)
            .map_err(|e| DeliveryError::DatabaseError(e.to_string()))?;

        let linked_ids = shift_deliveries::table
            .filter(shift_deliveries::user_id.eq(user_id))
            .select(shift_deliveries::delivery_id);

        deliveries::table
            .inner_join(user_deliveries::table.on(user_deliveries::delivery_id.eq(deliveries::id)))
            .filter(user_deliveries::user_id.eq(user_id))
            .filter(deliveries::delivery_time.ge(start_time))
            .filter(deliveries::delivery_time.le(end_time))
            .filter(deliveries::id.ne_all(linked_ids))
            .select(DeliveryDB::as_select())
            .order(deliveries::delivery_time.asc())
            .load::<DeliveryDB>(&mut conn)?
            .into_iter()
            .map(Delivery::try_from)
            .collect()
    }
}
