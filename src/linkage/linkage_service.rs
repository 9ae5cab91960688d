use diesel::sqlite::SqliteConnection;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use crate::db::{get_connection, DbPool};
use crate::deliveries::deliveries_model::Delivery;
use crate::linkage::linkage_errors::{LinkageError, Result};
use crate::linkage::linkage_model::ShiftDelivery;
use crate::linkage::linkage_repository::LinkageRepository;
use crate::linkage::linkage_traits::{LinkageRepositoryTrait, LinkageServiceTrait};
use crate::shifts::shifts_model::Shift;
use crate::shifts::shifts_repository::ShiftRepository;

/// Keeps the derived shift<->delivery linkage table consistent with the
/// delivery and shift tables. All operations run on the caller's connection
/// so they commit (or roll back) with the triggering record mutation.
pub struct LinkageMaintainer;

impl LinkageMaintainer {
    /// Delivery added: claim it for the first owned shift whose window and
    /// app match.
    pub fn link_new_delivery(
        conn: &mut SqliteConnection,
        user_id: &str,
        delivery: &Delivery,
    ) -> Result<Option<String>> {
        let covering =
            ShiftRepository::find_covering(conn, user_id, delivery.app, delivery.delivery_time)
                .map_err(|e| LinkageError::DatabaseError(e.to_string()))?;

        match covering {
            Some(shift) => {
                LinkageRepository::insert_link(conn, user_id, &shift.id, &delivery.id)?;
                debug!("Linked delivery {} to shift {}", delivery.id, shift.id);
                Ok(Some(shift.id))
            }
            None => Ok(None),
        }
    }

    /// Shift added: claim every owned delivery inside the window with a
    /// matching app.
    pub fn link_new_shift(
        conn: &mut SqliteConnection,
        user_id: &str,
        shift: &Shift,
    ) -> Result<usize> {
        let matching = LinkageRepository::matching_delivery_ids(
            conn,
            user_id,
            shift.app,
            shift.start_time,
            shift.end_time,
        )?;

        let mut inserted = 0;
        for delivery_id in &matching {
            inserted += LinkageRepository::insert_link(conn, user_id, &shift.id, delivery_id)?;
        }

        debug!("Linked {} deliveries to new shift {}", inserted, shift.id);
        Ok(inserted)
    }

    /// Shift updated: drop rows the new bounds/app no longer justify, then
    /// claim newly matching deliveries. Idempotent for unchanged bounds.
    pub fn relink_shift(conn: &mut SqliteConnection, user_id: &str, shift: &Shift) -> Result<()> {
        let current = LinkageRepository::links_with_delivery_for_shift(conn, user_id, &shift.id)?;

        let stale: Vec<String> = current
            .iter()
            .filter(|(_, delivery_time, app)| {
                app.parse()
                    .map(|app| !shift.covers(app, *delivery_time))
                    .unwrap_or(true)
            })
            .map(|(link_id, _, _)| link_id.clone())
            .collect();
        LinkageRepository::delete_links(conn, &stale)?;

        let matching = LinkageRepository::matching_delivery_ids(
            conn,
            user_id,
            shift.app,
            shift.start_time,
            shift.end_time,
        )?;
        let already_linked = LinkageRepository::linked_delivery_ids(conn, user_id, &shift.id)?;

        let mut inserted = 0;
        for delivery_id in matching
            .iter()
            .filter(|id| !already_linked.contains(id))
        {
            inserted += LinkageRepository::insert_link(conn, user_id, &shift.id, delivery_id)?;
        }

        debug!(
            "Relinked shift {}: removed {}, added {}",
            shift.id,
            stale.len(),
            inserted
        );
        Ok(())
    }

    /// Delivery updated: drop rows from shifts the delivery no longer fits,
    /// then claim it for a covering shift if it is unlinked.
    pub fn relink_delivery(
        conn: &mut SqliteConnection,
        user_id: &str,
        delivery: &Delivery,
    ) -> Result<()> {
        let links = LinkageRepository::links_for_delivery(conn, user_id, &delivery.id)?;

        let mut still_linked = false;
        let mut stale = Vec::new();
        for (link_id, shift_id) in &links {
            let shift = ShiftRepository::get_owned(conn, user_id, shift_id)
                .map_err(|e| LinkageError::DatabaseError(e.to_string()))?;
            if shift.covers(delivery.app, delivery.delivery_time) {
                still_linked = true;
            } else {
                stale.push(link_id.clone());
            }
        }
        LinkageRepository::delete_links(conn, &stale)?;

        if !still_linked {
            Self::link_new_delivery(conn, user_id, delivery)?;
        }
        Ok(())
    }
}

/// Service for explicit linkage operations: manual links and linked-delivery
/// queries. Record deletions cascade their linkage rows at the store level.
pub struct LinkageService {
    pool: Arc<DbPool>,
    linkage_repository: Arc<dyn LinkageRepositoryTrait>,
}

impl LinkageService {
    pub fn new(pool: Arc<DbPool>, linkage_repository: Arc<dyn LinkageRepositoryTrait>) -> Self {
        Self {
            pool,
            linkage_repository,
        }
    }
}

impl LinkageServiceTrait for LinkageService {
    /// Manually link a delivery to a shift, validating the window/app
    /// predicate first
    fn link(&self, user_id: &str, shift_id: &str, delivery_id: &str) -> Result<()> {
        let mut conn =
            get_connection(&self.pool).map_err(|e| LinkageError::DatabaseError(e.to_string()))?;

        let shift = ShiftRepository::get_owned(&mut conn, user_id, shift_id)
            .map_err(|e| LinkageError::NotFound(e.to_string()))?;
        let delivery =
            crate::deliveries::DeliveryRepository::get_owned(&mut conn, user_id, delivery_id)
                .map_err(|e| LinkageError::NotFound(e.to_string()))?;

        if delivery.delivery_time < shift.start_time || delivery.delivery_time > shift.end_time {
            return Err(LinkageError::OutsideWindow);
        }
        if delivery.app != shift.app {
            return Err(LinkageError::AppMismatch);
        }

        LinkageRepository::insert_link(&mut conn, user_id, shift_id, delivery_id)?;
        Ok(())
    }

    fn deliveries_for_shift(&self, user_id: &str, shift_id: &str) -> Result<Vec<Delivery>> {
        self.linkage_repository
            .deliveries_for_shift(user_id, shift_id)
    }

    fn counts_by_shift(&self, user_id: &str) -> Result<HashMap<String, i64>> {
        self.linkage_repository.counts_by_shift(user_id)
    }

    fn rows_for_owner(&self, user_id: &str) -> Result<Vec<ShiftDelivery>> {
        self.linkage_repository.rows_for_owner(user_id)
    }
}
