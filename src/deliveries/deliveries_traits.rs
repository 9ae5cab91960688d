use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::deliveries::deliveries_errors::Result;
use crate::deliveries::deliveries_model::{Delivery, DeliveryApp, DeliveryUpdate, NewDelivery};

/// Trait for delivery read operations against committed state
pub trait DeliveryRepositoryTrait: Send + Sync {
    /// Get all deliveries owned by a user
    fn get_by_owner(&self, user_id: &str) -> Result<Vec<Delivery>>;

    /// Get one delivery, scoped to its owner
    fn get_by_id(&self, user_id: &str, delivery_id: &str) -> Result<Delivery>;

    /// Get deliveries filtered by an optional time window and app
    fn get_filtered(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> Result<Vec<Delivery>>;

    /// Get deliveries in the window not linked to any shift
    fn get_unlinked_in_window(
        &self,
        user_id: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> Result<Vec<Delivery>>;
}

/// Trait for the delivery mutation service
#[async_trait]
pub trait DeliveryServiceTrait: Send + Sync {
    fn get_deliveries(&self, user_id: &str) -> crate::Result<Vec<Delivery>>;

    fn get_delivery(&self, user_id: &str, delivery_id: &str) -> crate::Result<Delivery>;

    fn get_filtered_deliveries(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> crate::Result<Vec<Delivery>>;

    /// Deliveries in the window no shift has claimed yet
    fn get_unlinked_deliveries(
        &self,
        user_id: &str,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
    ) -> crate::Result<Vec<Delivery>>;

    /// Commit a new delivery (row + ownership edge + linkage), then notify
    async fn create_delivery(&self, user_id: &str, delivery: NewDelivery)
        -> crate::Result<Delivery>;

    /// Commit an update (relinking the delivery if window/app changed), then notify
    async fn update_delivery(
        &self,
        user_id: &str,
        delivery: DeliveryUpdate,
    ) -> crate::Result<Delivery>;

    /// Delete a delivery and its linkage rows, then notify
    async fn delete_delivery(&self, user_id: &str, delivery_id: &str) -> crate::Result<Delivery>;
}
