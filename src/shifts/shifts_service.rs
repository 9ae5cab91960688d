use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::debug;

use crate::db::{DbPool, DbTransactionExecutor};
use crate::deliveries::DeliveryApp;
use crate::linkage::LinkageMaintainer;
use crate::realtime::NotifierTrait;
use crate::shifts::shifts_model::{NewShift, Shift, ShiftUpdate};
use crate::shifts::shifts_repository::ShiftRepository;
use crate::shifts::shifts_traits::{ShiftRepositoryTrait, ShiftServiceTrait};
use crate::statistics::StatsKind;
use crate::Result;

/// Shift mutations change the shift set and its linkage rows
const AFFECTED_STATS: [StatsKind; 1] = [StatsKind::ShiftStats];

/// Service wiring shift mutations to linkage maintenance and push updates
pub struct ShiftService {
    pool: Arc<DbPool>,
    shift_repository: Arc<dyn ShiftRepositoryTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl ShiftService {
    pub fn new(
        pool: Arc<DbPool>,
        shift_repository: Arc<dyn ShiftRepositoryTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        ShiftService {
            pool,
            shift_repository,
            notifier,
        }
    }
}

#[async_trait]
impl ShiftServiceTrait for ShiftService {
    fn get_shifts(&self, user_id: &str) -> Result<Vec<Shift>> {
        Ok(self.shift_repository.get_by_owner(user_id)?)
    }

    fn get_shift(&self, user_id: &str, shift_id: &str) -> Result<Shift> {
        Ok(self.shift_repository.get_by_id(user_id, shift_id)?)
    }

    fn get_filtered_shifts(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> Result<Vec<Shift>> {
        Ok(self
            .shift_repository
            .get_filtered(user_id, start_time, end_time, app)?)
    }

    fn get_shift_apps(&self, user_id: &str) -> Result<Vec<DeliveryApp>> {
        Ok(self.shift_repository.get_apps(user_id)?)
    }

    async fn create_shift(&self, user_id: &str, shift: NewShift) -> Result<Shift> {
        shift.validate(Utc::now().naive_utc())?;

        let created = self.pool.execute(|conn| -> Result<Shift> {
            let created = ShiftRepository::insert_with_owner(conn, user_id, shift)?;
            LinkageMaintainer::link_new_shift(conn, user_id, &created)?;
            Ok(created)
        })?;

        debug!("Created shift {} for user {}", created.id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(created)
    }

    async fn update_shift(&self, user_id: &str, shift: ShiftUpdate) -> Result<Shift> {
        shift.validate(Utc::now().naive_utc())?;
        // Surfaces NotFound before the transaction swallows it
        self.shift_repository.get_by_id(user_id, &shift.id)?;

        let updated = self.pool.execute(|conn| -> Result<Shift> {
            let updated = ShiftRepository::update_owned(conn, user_id, shift)?;
            LinkageMaintainer::relink_shift(conn, user_id, &updated)?;
            Ok(updated)
        })?;

        debug!("Updated shift {} for user {}", updated.id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(updated)
    }

    async fn delete_shift(&self, user_id: &str, shift_id: &str) -> Result<Shift> {
        self.shift_repository.get_by_id(user_id, shift_id)?;

        let deleted = self.pool.execute(|conn| -> Result<Shift> {
            Ok(ShiftRepository::delete_owned(conn, user_id, shift_id)?)
        })?;

        debug!("Deleted shift {} for user {}", shift_id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(deleted)
    }
}
