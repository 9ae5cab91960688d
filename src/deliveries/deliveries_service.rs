use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::debug;

use crate::db::{DbPool, DbTransactionExecutor};
use crate::deliveries::deliveries_model::{Delivery, DeliveryApp, DeliveryUpdate, NewDelivery};
use crate::deliveries::deliveries_repository::DeliveryRepository;
use crate::deliveries::deliveries_traits::{DeliveryRepositoryTrait, DeliveryServiceTrait};
use crate::linkage::LinkageMaintainer;
use crate::realtime::NotifierTrait;
use crate::statistics::StatsKind;
use crate::Result;

/// Delivery mutations also move linkage rows, so both snapshots go stale
const AFFECTED_STATS: [StatsKind; 2] = [StatsKind::DeliveryStats, StatsKind::ShiftStats];

/// Service wiring delivery mutations to linkage maintenance and push updates
pub struct DeliveryService {
    pool: Arc<DbPool>,
    delivery_repository: Arc<dyn DeliveryRepositoryTrait>,
    notifier: Arc<dyn NotifierTrait>,
}

impl DeliveryService {
    pub fn new(
        pool: Arc<DbPool>,
        delivery_repository: Arc<dyn DeliveryRepositoryTrait>,
        notifier: Arc<dyn NotifierTrait>,
    ) -> Self {
        DeliveryService {
            pool,
            delivery_repository,
            notifier,
        }
    }
}

#[async_trait]
impl DeliveryServiceTrait for DeliveryService {
    fn get_deliveries(&self, user_id: &str) -> Result<Vec<Delivery>> {
        Ok(self.delivery_repository.get_by_owner(user_id)?)
    }

    fn get_delivery(&self, user_id: &str, delivery_id: &str) -> Result<Delivery> {
        Ok(self.delivery_repository.get_by_id(user_id, delivery_id)?)
    }

    fn get_filtered_deliveries(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> Result<Vec<Delivery>> {
        Ok(self
            .delivery_repository
            .get_filtered(user_id, start_time, end_time, app)?)
    }

    fn get_unlinked_deliveries(
        &self,
        user_id: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<Delivery>> {
        Ok(self
            .delivery_repository
            .get_unlinked_in_window(user_id, start_time, end_time)?)
    }

    async fn create_delivery(&self, user_id: &str, delivery: NewDelivery) -> Result<Delivery> {
        delivery.validate()?;

        let created = self.pool.execute(|conn| -> Result<Delivery> {
            let created = DeliveryRepository::insert_with_owner(conn, user_id, delivery)?;
            LinkageMaintainer::link_new_delivery(conn, user_id, &created)?;
            Ok(created)
        })?;

        debug!("Created delivery {} for user {}", created.id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(created)
    }

    async fn update_delivery(&self, user_id: &str, delivery: DeliveryUpdate) -> Result<Delivery> {
        delivery.validate()?;
        // Surfaces NotFound before the transaction swallows it
        self.delivery_repository.get_by_id(user_id, &delivery.id)?;

        let updated = self.pool.execute(|conn| -> Result<Delivery> {
            let updated = DeliveryRepository::update_owned(conn, user_id, delivery)?;
            LinkageMaintainer::relink_delivery(conn, user_id, &updated)?;
            Ok(updated)
        })?;

        debug!("Updated delivery {} for user {}", updated.id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(updated)
    }

    async fn delete_delivery(&self, user_id: &str, delivery_id: &str) -> Result<Delivery> {
        self.delivery_repository.get_by_id(user_id, delivery_id)?;

        let deleted = self.pool.execute(|conn| -> Result<Delivery> {
            Ok(DeliveryRepository::delete_owned(conn, user_id, delivery_id)?)
        })?;

        debug!("Deleted delivery {} for user {}", delivery_id, user_id);
        self.notifier.notify(user_id, &AFFECTED_STATS);
        Ok(deleted)
    }
}
