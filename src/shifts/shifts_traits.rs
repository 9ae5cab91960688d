use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::deliveries::DeliveryApp;
use crate::shifts::shifts_errors::Result;
use crate::shifts::shifts_model::{NewShift, Shift, ShiftUpdate};

/// Trait for shift read operations against committed state
pub trait ShiftRepositoryTrait: Send + Sync {
    /// Get all shifts owned by a user
    fn get_by_owner(&self, user_id: &str) -> Result<Vec<Shift>>;

    /// Get one shift, scoped to its owner
    fn get_by_id(&self, user_id: &str, shift_id: &str) -> Result<Shift>;

    /// Get shifts filtered by an optional time window and app
    fn get_filtered(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> Result<Vec<Shift>>;

    /// Distinct apps the user has worked shifts on
    fn get_apps(&self, user_id: &str) -> Result<Vec<DeliveryApp>>;
}

/// Trait for the shift mutation service
#[async_trait]
pub trait ShiftServiceTrait: Send + Sync {
    fn get_shifts(&self, user_id: &str) -> crate::Result<Vec<Shift>>;

    fn get_shift(&self, user_id: &str, shift_id: &str) -> crate::Result<Shift>;

    fn get_filtered_shifts(
        &self,
        user_id: &str,
        start_time: Option<NaiveDateTime>,
        end_time: Option<NaiveDateTime>,
        app: Option<DeliveryApp>,
    ) -> crate::Result<Vec<Shift>>;

    fn get_shift_apps(&self, user_id: &str) -> crate::Result<Vec<DeliveryApp>>;

    /// Commit a new shift, claim matching deliveries, then notify
    async fn create_shift(&self, user_id: &str, shift: NewShift) -> crate::Result<Shift>;

    /// Commit changed bounds/app, reconcile linkage rows, then notify
    async fn update_shift(&self, user_id: &str, shift: ShiftUpdate) -> crate::Result<Shift>;

    /// Delete a shift and all its linkage rows, then notify
    async fn delete_shift(&self, user_id: &str, shift_id: &str) -> crate::Result<Shift>;
}
